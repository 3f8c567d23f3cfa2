//! Observation pipeline: raw phase figures, then name, rise/set and next-phase forecast.

pub mod forecast;
pub mod naming;
pub mod phase;
pub mod times;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use self::forecast::{NextPhaseForecast, forecast_next_phase};
use self::naming::PhaseName;
use self::phase::{PhaseFigures, calculate_phase};
use self::times::{RiseSetEstimate, RiseSetStrategy};

/// Everything the engine reports for one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseObservation {
    pub date: NaiveDate,
    pub phase_fraction: f64,
    pub illumination_fraction: f64,
    pub phase_name: PhaseName,
    pub age_days: f64,
    pub distance_km: i64,
    pub rise_set: RiseSetEstimate,
    pub next_phase: NextPhaseForecast,
}

impl PhaseObservation {
    /// The raw figures this observation was derived from.
    pub fn figures(&self) -> PhaseFigures {
        PhaseFigures {
            phase_fraction: self.phase_fraction,
            illumination_fraction: self.illumination_fraction,
            age_days: self.age_days,
            distance_km: self.distance_km,
        }
    }
}

/// Run the full pipeline for `instant`. Rise/set and the forecast use its UTC calendar date.
pub fn observe(instant: DateTime<Utc>, strategy: &RiseSetStrategy) -> PhaseObservation {
    let figures = calculate_phase(instant);
    let date = instant.date_naive();
    PhaseObservation {
        date,
        phase_fraction: figures.phase_fraction,
        illumination_fraction: figures.illumination_fraction,
        phase_name: PhaseName::from_fraction(figures.phase_fraction),
        age_days: figures.age_days,
        distance_km: figures.distance_km,
        rise_set: strategy.estimate(date, figures.phase_fraction),
        next_phase: forecast_next_phase(figures.age_days, date),
    }
}
