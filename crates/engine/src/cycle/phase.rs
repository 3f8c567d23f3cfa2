//! Raw phase figures: position in the synodic month, illumination, age and distance.
//!
//! Phase and distance run on two independent clocks. The synodic month drives
//! phase, illumination and age; the anomalistic month drives distance.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};
use lunar_core::constants::{
    ANOMALISTIC_MONTH_DAYS, DISTANCE_AMPLITUDE_KM, MEAN_DISTANCE_KM, SYNODIC_MONTH_DAYS,
};
use lunar_core::time::days_since_reference;
use serde::Serialize;

/// Unnamed figures for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseFigures {
    /// Position in the synodic month, `[0, 1)`. 0 is new moon, 0.5 is full.
    pub phase_fraction: f64,
    /// Lit fraction of the disc, `[0, 1]`.
    pub illumination_fraction: f64,
    /// Days since the last new moon, `[0, SYNODIC_MONTH_DAYS)`.
    pub age_days: f64,
    /// Earth-Moon distance rounded to whole kilometres.
    pub distance_km: i64,
}

/// Compute the phase figures for an instant.
pub fn calculate_phase(instant: DateTime<Utc>) -> PhaseFigures {
    figures_from_elapsed(days_since_reference(instant))
}

/// Compute the phase figures from fractional days since the reference new moon.
pub fn figures_from_elapsed(elapsed_days: f64) -> PhaseFigures {
    let mut phase_fraction = wrap_period(elapsed_days, SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS;
    if phase_fraction >= 1.0 {
        phase_fraction = 0.0;
    }
    PhaseFigures {
        phase_fraction,
        illumination_fraction: illumination(phase_fraction),
        age_days: phase_fraction * SYNODIC_MONTH_DAYS,
        distance_km: distance_km(elapsed_days),
    }
}

/// Triangular illumination: 0 at new moon, 1 at full moon.
pub fn illumination(phase_fraction: f64) -> f64 {
    if phase_fraction < 0.5 {
        phase_fraction * 2.0
    } else {
        (1.0 - phase_fraction) * 2.0
    }
}

/// Distance from the anomalistic cycle alone, rounded to the nearest kilometre.
pub fn distance_km(elapsed_days: f64) -> i64 {
    let anomalistic_age = wrap_period(elapsed_days, ANOMALISTIC_MONTH_DAYS);
    let distance =
        MEAN_DISTANCE_KM - DISTANCE_AMPLITUDE_KM * (TAU * anomalistic_age / ANOMALISTIC_MONTH_DAYS).cos();
    distance.round() as i64
}

// ((x mod p) + p) mod p; `%` keeps the dividend's sign.
fn wrap_period(value: f64, period: f64) -> f64 {
    let wrapped = ((value % period) + period) % period;
    // Tiny negative inputs can round up to exactly `period`.
    if wrapped >= period { 0.0 } else { wrapped }
}
