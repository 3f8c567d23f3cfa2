//! Moonrise and moonset estimates.
//!
//! With an observer the times come from the ephemeris horizon search and are
//! UTC clock times on the requested date. Without one they are a phase-only
//! approximation: new moon rises at 06:00 and every tenth of a cycle pushes
//! rise 2.4 hours later; set follows rise by twelve hours.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use lunar_core::geo::GeoCoordinate;
use serde::{Serialize, Serializer};

/// Rise time of a new moon in the phase-only approximation (hours).
pub const NEW_MOON_RISE_HOUR: f64 = 6.0;
const HOURS_PER_DAY: f64 = 24.0;
const RISE_TO_SET_HOURS: f64 = 12.0;

/// A clock time for an event, or the placeholder when there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    At(NaiveTime),
    Unavailable,
}

impl EventTime {
    /// Convert fractional hours since midnight, truncated to the minute.
    ///
    /// Anything outside `[0, 24)` or non-finite is unavailable.
    pub fn from_hours(hours: f64) -> Self {
        if !hours.is_finite() || !(0.0..HOURS_PER_DAY).contains(&hours) {
            return Self::Unavailable;
        }
        let hour = hours.floor();
        let minute = ((hours - hour) * 60.0).floor();
        NaiveTime::from_hms_opt(hour as u32, minute as u32, 0)
            .map(Self::At)
            .unwrap_or(Self::Unavailable)
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::At(time) => Some(*time),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(time) => write!(f, "{:02}:{:02}", time.hour(), time.minute()),
            Self::Unavailable => f.write_str("--:--"),
        }
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rise and set for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiseSetEstimate {
    pub rise: EventTime,
    pub set: EventTime,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub always_up: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub always_down: bool,
}

/// How rise/set are estimated, chosen by whether an observer is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetStrategy {
    /// Horizon search for a real observer.
    LocationAware(GeoCoordinate),
    /// Phase-only approximation.
    Fallback,
}

impl RiseSetStrategy {
    pub fn for_observer(observer: Option<GeoCoordinate>) -> Self {
        observer.map_or(Self::Fallback, Self::LocationAware)
    }

    /// Estimate rise/set on `date` for a moon at `phase_fraction`.
    pub fn estimate(&self, date: NaiveDate, phase_fraction: f64) -> RiseSetEstimate {
        match self {
            Self::LocationAware(observer) => location_aware(date, observer),
            Self::Fallback => fallback(phase_fraction),
        }
    }
}

fn location_aware(date: NaiveDate, observer: &GeoCoordinate) -> RiseSetEstimate {
    let crossings = lunar_ephemeris::rise_set(date, observer);
    let rise = crossings
        .rise_hours
        .map_or(EventTime::Unavailable, EventTime::from_hours);
    let set = crossings
        .set_hours
        .map_or(EventTime::Unavailable, EventTime::from_hours);
    RiseSetEstimate {
        rise,
        set,
        always_up: crossings.always_up,
        always_down: crossings.always_down,
    }
}

/// Phase-only rise/set. Output is kept stable for existing consumers.
pub fn fallback(phase_fraction: f64) -> RiseSetEstimate {
    let rise_hours = (NEW_MOON_RISE_HOUR + phase_fraction * HOURS_PER_DAY) % HOURS_PER_DAY;
    let set_hours = (rise_hours + RISE_TO_SET_HOURS) % HOURS_PER_DAY;
    RiseSetEstimate {
        rise: EventTime::from_hours(rise_hours),
        set: EventTime::from_hours(set_hours),
        always_up: false,
        always_down: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> EventTime {
        EventTime::At(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn fallback_anchors_new_moon_at_six() {
        let estimate = fallback(0.0);
        assert_eq!(estimate.rise, hm(6, 0));
        assert_eq!(estimate.set, hm(18, 0));
    }

    #[test]
    fn fallback_full_moon_rises_at_evening() {
        let estimate = fallback(0.5);
        assert_eq!(estimate.rise.to_string(), "18:00");
        assert_eq!(estimate.set.to_string(), "06:00");
    }

    #[test]
    fn fallback_wraps_past_midnight() {
        let estimate = fallback(0.8);
        // 6 + 19.2 = 25.2 -> 01:12
        assert_eq!(estimate.rise, hm(1, 12));
        assert_eq!(estimate.set, hm(13, 12));
    }

    #[test]
    fn hours_outside_day_are_unavailable() {
        assert_eq!(EventTime::from_hours(f64::NAN), EventTime::Unavailable);
        assert_eq!(EventTime::from_hours(24.0), EventTime::Unavailable);
        assert_eq!(EventTime::from_hours(-0.1), EventTime::Unavailable);
        assert_eq!(EventTime::Unavailable.to_string(), "--:--");
        assert_eq!(EventTime::from_hours(23.999), hm(23, 59));
    }

    #[test]
    fn strategy_follows_observer_presence() {
        assert_eq!(RiseSetStrategy::for_observer(None), RiseSetStrategy::Fallback);
        let paris = GeoCoordinate::new(48.85, 2.35).unwrap();
        assert_eq!(
            RiseSetStrategy::for_observer(Some(paris)),
            RiseSetStrategy::LocationAware(paris)
        );
    }

    #[test]
    fn location_aware_reports_clock_times() {
        let paris = GeoCoordinate::new(48.85, 2.35).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let estimate = RiseSetStrategy::LocationAware(paris).estimate(date, 0.1);
        assert!(estimate.rise.time().is_some() || estimate.set.time().is_some());
        assert!(!(estimate.always_up && estimate.always_down));
    }

    #[test]
    fn serializes_as_clock_strings() {
        let json = serde_json::to_string(&fallback(0.25)).unwrap();
        assert_eq!(json, r#"{"rise":"12:00","set":"00:00"}"#);
    }
}
