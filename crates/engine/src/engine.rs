//! Validated entry points over the observation pipeline and calendar helpers.

use chrono::{DateTime, NaiveDate, Utc};
use lunar_config::EngineConfig;
use lunar_core::geo::{CoordinateError, GeoCoordinate};
use lunar_core::time::start_of_day;
use serde::Serialize;
use thiserror::Error;

use crate::calendar::{
    self, ArcError, ArcInterval, DateArc, RangeError, RangeGuard, RotationSpeed,
};
use crate::cycle::times::RiseSetStrategy;
use crate::cycle::{self, PhaseObservation};

/// Everything a caller can get wrong. None of these are internal faults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Arc(#[from] ArcError),
    #[error("invalid calendar date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("rotation angle {0} cannot be mapped to a date")]
    InvalidAngle(f64),
    #[error("invalid observer coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
}

/// Result of a dial navigation with the observation for the landing date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub base: NaiveDate,
    pub angle_degrees: f64,
    pub speed: RotationSpeed,
    pub day_offset: i64,
    pub date: NaiveDate,
    pub observation: PhaseObservation,
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(EngineError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(input.to_string()))
}

/// Stateless lunar engine. "Today" is read from the clock on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoonEngine {
    guard: RangeGuard,
}

impl MoonEngine {
    pub fn new(guard: RangeGuard) -> Self {
        Self { guard }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(RangeGuard::from(config.limits))
    }

    pub fn guard(&self) -> &RangeGuard {
        &self.guard
    }

    fn today() -> NaiveDate {
        lunar_core::time::today()
    }

    /// Observation for an instant, with location-aware rise/set when `observer` is given.
    pub fn compute_observation(
        &self,
        instant: DateTime<Utc>,
        observer: Option<GeoCoordinate>,
    ) -> Result<PhaseObservation, EngineError> {
        if let Some(observer) = &observer {
            observer.validate()?;
        }
        self.guard.check_date(instant.date_naive(), Self::today())?;
        let observation = cycle::observe(instant, &RiseSetStrategy::for_observer(observer));
        log::debug!(
            "observed {instant}: phase={:.4} name={} distance={}km",
            observation.phase_fraction,
            observation.phase_name,
            observation.distance_km
        );
        Ok(observation)
    }

    /// Observation at midnight UTC on a calendar date.
    pub fn observe_date(
        &self,
        date: NaiveDate,
        observer: Option<GeoCoordinate>,
    ) -> Result<PhaseObservation, EngineError> {
        self.compute_observation(start_of_day(date), observer)
    }

    /// Observation for a `YYYY-MM-DD` string.
    pub fn observe_str(
        &self,
        date: &str,
        observer: Option<GeoCoordinate>,
    ) -> Result<PhaseObservation, EngineError> {
        self.observe_date(parse_calendar_date(date)?, observer)
    }

    /// One phase-only observation per day from `start` to `end`, both inclusive.
    ///
    /// The whole range is validated before any day is computed.
    pub fn compute_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PhaseObservation>, EngineError> {
        let span = self.guard.check_range(start, end, Self::today())?;
        log::debug!("computing {} observations from {start} to {end}", span + 1);
        let strategy = RiseSetStrategy::Fallback;
        Ok(start
            .iter_days()
            .take(span as usize + 1)
            .map(|date| cycle::observe(start_of_day(date), &strategy))
            .collect())
    }

    /// Date reached by turning the dial `angle_degrees` from `base`.
    pub fn navigate_by_rotation(
        &self,
        base: NaiveDate,
        angle_degrees: f64,
        speed: RotationSpeed,
    ) -> Result<NaiveDate, EngineError> {
        if !angle_degrees.is_finite() {
            return Err(EngineError::InvalidAngle(angle_degrees));
        }
        let today = Self::today();
        self.guard.check_date(base, today)?;
        let date = calendar::navigate_by_rotation(base, angle_degrees, speed)
            .ok_or(EngineError::InvalidAngle(angle_degrees))?;
        self.guard.check_date(date, today)?;
        Ok(date)
    }

    /// Navigate, then observe the landing date.
    pub fn navigate_and_observe(
        &self,
        base: NaiveDate,
        angle_degrees: f64,
        speed: RotationSpeed,
        observer: Option<GeoCoordinate>,
    ) -> Result<Navigation, EngineError> {
        let date = self.navigate_by_rotation(base, angle_degrees, speed)?;
        let observation = self.observe_date(date, observer)?;
        Ok(Navigation {
            base,
            angle_degrees,
            speed,
            day_offset: calendar::day_offset(angle_degrees, speed),
            date,
            observation,
        })
    }

    /// Symmetric arc of `total_dates / 2` steps either side of `center`.
    ///
    /// The centre and both ends must lie in the window; nothing is built otherwise.
    pub fn generate_date_arc(
        &self,
        center: NaiveDate,
        interval_days: u32,
        total_dates: u32,
    ) -> Result<DateArc, EngineError> {
        let interval = ArcInterval::try_from(interval_days)?;
        let today = Self::today();
        self.guard.check_date(center, today)?;
        let (first, last) = calendar::arc_bounds(center, interval, total_dates)?;
        self.guard.check_date(first, today)?;
        self.guard.check_date(last, today)?;
        Ok(calendar::generate_date_arc(center, interval, total_dates)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;

    #[test]
    fn strict_iso_dates_only() {
        assert_eq!(
            parse_calendar_date("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        for bad in ["2023-02-29", "2024-2-9", "24-02-29", "2024/02/29", "", "tomorrow"] {
            assert_eq!(
                parse_calendar_date(bad),
                Err(EngineError::InvalidDate(bad.to_string()))
            );
        }
    }

    #[test]
    fn invalid_observer_is_rejected_before_work() {
        let engine = MoonEngine::default();
        let bad = GeoCoordinate {
            latitude_deg: 120.0,
            longitude_deg: 0.0,
        };
        assert_eq!(
            engine.compute_observation(Utc::now(), Some(bad)),
            Err(EngineError::InvalidCoordinate(CoordinateError::Latitude(120.0)))
        );
    }

    #[test]
    fn non_finite_angle_is_rejected() {
        let engine = MoonEngine::default();
        let today = Utc::now().date_naive();
        assert_eq!(
            engine.navigate_by_rotation(today, f64::INFINITY, RotationSpeed::Slow),
            Err(EngineError::InvalidAngle(f64::INFINITY))
        );
        assert!(matches!(
            engine.navigate_by_rotation(today, f64::NAN, RotationSpeed::Fast),
            Err(EngineError::InvalidAngle(_))
        ));
    }

    #[test]
    fn range_errors_convert_transparently() {
        let engine = MoonEngine::default();
        let today = Utc::now().date_naive();
        let err = engine.compute_range(today + Days::new(1), today).unwrap_err();
        assert!(matches!(err, EngineError::Range(RangeError::InvalidDateRange { .. })));
        assert!(err.to_string().contains("is after end date"));
    }
}
