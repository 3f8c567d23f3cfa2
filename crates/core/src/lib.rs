//! Core units, constants, and shared primitives for the lunar cycle workspace.

/// Lunar and calendar constants. Periods are expressed in days, distances in kilometres.
pub mod constants {
    /// Mean synodic month (new moon to new moon).
    pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_67;
    /// Mean anomalistic month (perigee to perigee).
    pub const ANOMALISTIC_MONTH_DAYS: f64 = 27.554_55;
    /// Reference new moon, 2000-01-06T18:14:00Z, as Unix seconds.
    pub const REFERENCE_NEW_MOON_UNIX_SECONDS: i64 = 947_182_440;
    /// Mean Earth-Moon distance used by the distance oscillation.
    pub const MEAN_DISTANCE_KM: f64 = 384_400.0;
    /// Half the perigee/apogee swing around the mean distance.
    pub const DISTANCE_AMPLITUDE_KM: f64 = 21_400.0;
    /// Milliseconds per civil day.
    pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
    /// Julian date of the Unix epoch.
    pub const JULIAN_DATE_UNIX_EPOCH: f64 = 2_440_587.5;
    /// Julian date of J2000.0.
    pub const JULIAN_DATE_J2000: f64 = 2_451_545.0;
}

/// Angle conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(deg: f64) -> f64 {
        deg.to_radians()
    }
}

/// Time utilities shared across crates. All instants are UTC.
pub mod time {
    use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

    use super::constants::{
        JULIAN_DATE_J2000, JULIAN_DATE_UNIX_EPOCH, MILLIS_PER_DAY, REFERENCE_NEW_MOON_UNIX_SECONDS,
    };

    /// The reference new moon every phase calculation is anchored to.
    pub fn reference_new_moon() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(REFERENCE_NEW_MOON_UNIX_SECONDS)
    }

    /// Signed, fractional days from `from` to `to`.
    #[inline]
    pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        (to.timestamp_millis() - from.timestamp_millis()) as f64 / MILLIS_PER_DAY
    }

    /// Fractional days since the reference new moon (negative before it).
    #[inline]
    pub fn days_since_reference(instant: DateTime<Utc>) -> f64 {
        elapsed_days(reference_new_moon(), instant)
    }

    /// Julian date of an instant.
    #[inline]
    pub fn julian_date(instant: DateTime<Utc>) -> f64 {
        instant.timestamp_millis() as f64 / MILLIS_PER_DAY + JULIAN_DATE_UNIX_EPOCH
    }

    /// Days since J2000.0, the argument of the low-precision lunar series.
    #[inline]
    pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
        julian_date(instant) - JULIAN_DATE_J2000
    }

    /// Today's calendar date in UTC, read from the system clock.
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Midnight UTC at the start of a calendar date.
    #[inline]
    pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Geographic observer coordinates.
pub mod geo {
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    /// Errors raised when constructing a [`GeoCoordinate`].
    #[derive(Debug, Clone, Copy, PartialEq, Error)]
    pub enum CoordinateError {
        #[error("latitude {0} is outside [-90, 90] degrees")]
        Latitude(f64),
        #[error("longitude {0} is outside [-180, 180] degrees")]
        Longitude(f64),
    }

    /// A point on Earth in degrees. East longitude and north latitude are positive.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct GeoCoordinate {
        pub latitude_deg: f64,
        pub longitude_deg: f64,
    }

    impl GeoCoordinate {
        /// Validate and build a coordinate. Non-finite values are rejected.
        pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, CoordinateError> {
            let coordinate = Self {
                latitude_deg,
                longitude_deg,
            };
            coordinate.validate()?;
            Ok(coordinate)
        }

        /// Check the coordinate lies on the globe. Useful after deserializing.
        pub fn validate(&self) -> Result<(), CoordinateError> {
            if !(-90.0..=90.0).contains(&self.latitude_deg) {
                return Err(CoordinateError::Latitude(self.latitude_deg));
            }
            if !(-180.0..=180.0).contains(&self.longitude_deg) {
                return Err(CoordinateError::Longitude(self.longitude_deg));
            }
            Ok(())
        }
    }
}
