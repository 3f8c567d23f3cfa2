//! Lunar ephemeris helpers: low-precision Moon position and horizon crossings.
//!
//! Everything here is a pure numeric function of time and observer location.
//! No kernels or network services are consulted.

pub mod position;
pub mod riseset;

use chrono::NaiveDate;
use lunar_core::geo::GeoCoordinate;

pub use position::{EquatorialPosition, moon_altitude_rad, moon_position};
pub use riseset::{HORIZON_CORRECTION_DEG, MoonCrossings, moon_crossings};

/// Moonrise/moonset for `date` as seen from `observer`, logging circumpolar days.
pub fn rise_set(date: NaiveDate, observer: &GeoCoordinate) -> MoonCrossings {
    let crossings = moon_crossings(date, observer);
    if crossings.always_up || crossings.always_down {
        log::debug!(
            "moon does not cross the horizon on {date} at ({:.3}, {:.3}); always_up={}",
            observer.latitude_deg,
            observer.longitude_deg,
            crossings.always_up
        );
    }
    crossings
}
