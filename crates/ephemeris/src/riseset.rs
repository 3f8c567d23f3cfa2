//! Moonrise and moonset search for an observer on a calendar day.
//!
//! The Moon's altitude is sampled every hour from 00:00 UTC. Each pair of
//! two-hour windows is fitted with a parabola through three samples and the
//! roots inside the window are the horizon crossings.

use chrono::NaiveDate;
use lunar_core::geo::GeoCoordinate;
use lunar_core::time::{days_since_j2000, start_of_day};
use lunar_core::units::deg_to_rad;

use crate::position::moon_altitude_rad;

/// Horizon dip for the Moon: mean parallax minus semidiameter (degrees).
pub const HORIZON_CORRECTION_DEG: f64 = 0.133;

const HOURS_PER_DAY: f64 = 24.0;

/// Horizon crossings found on a single UTC day, in fractional hours from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoonCrossings {
    pub rise_hours: Option<f64>,
    pub set_hours: Option<f64>,
    /// No crossing, Moon above the horizon all day.
    pub always_up: bool,
    /// No crossing, Moon below the horizon all day.
    pub always_down: bool,
}

/// Search the UTC day starting at `date` for moonrise and moonset.
pub fn moon_crossings(date: NaiveDate, observer: &GeoCoordinate) -> MoonCrossings {
    let day_start = days_since_j2000(start_of_day(date));
    let hc = deg_to_rad(HORIZON_CORRECTION_DEG);
    let altitude_at = |hour: f64| {
        moon_altitude_rad(
            day_start + hour / HOURS_PER_DAY,
            observer.latitude_deg,
            observer.longitude_deg,
        ) - hc
    };

    let mut crossings = MoonCrossings::default();
    let mut h0 = altitude_at(0.0);
    let mut ye = 0.0;

    for i in (1..24).step_by(2) {
        let hour = i as f64;
        let h1 = altitude_at(hour);
        let h2 = altitude_at(hour + 1.0);

        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        if a.abs() < f64::EPSILON {
            h0 = h2;
            continue;
        }
        let xe = -b / (2.0 * a);
        ye = (a * xe + b) * xe + h1;
        let discriminant = b * b - 4.0 * a * h1;

        let mut roots = 0;
        let (mut x1, mut x2) = (0.0, 0.0);
        if discriminant >= 0.0 {
            let dx = discriminant.sqrt() / (a.abs() * 2.0);
            x1 = xe - dx;
            x2 = xe + dx;
            if x1.abs() <= 1.0 {
                roots += 1;
            }
            if x2.abs() <= 1.0 {
                roots += 1;
            }
            if x1 < -1.0 {
                x1 = x2;
            }
        }

        match roots {
            1 if h0 < 0.0 => crossings.rise_hours = Some(hour + x1),
            1 => crossings.set_hours = Some(hour + x1),
            2 => {
                let (rise, set) = if ye < 0.0 { (x2, x1) } else { (x1, x2) };
                crossings.rise_hours = Some(hour + rise);
                crossings.set_hours = Some(hour + set);
            }
            _ => {}
        }

        if crossings.rise_hours.is_some() && crossings.set_hours.is_some() {
            break;
        }
        h0 = h2;
    }

    if crossings.rise_hours.is_none() && crossings.set_hours.is_none() {
        if ye > 0.0 {
            crossings.always_up = true;
        } else {
            crossings.always_down = true;
        }
    }

    crossings
}
