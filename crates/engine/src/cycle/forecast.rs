//! Next major phase after a given moon age.

use std::fmt;

use chrono::{Days, NaiveDate};
use lunar_core::constants::SYNODIC_MONTH_DAYS;
use serde::Serialize;

use super::naming::PhaseName;

/// Major phases by their fraction of the cycle; new moon closes the cycle at 1.0.
const MAJOR_PHASES: [(f64, PhaseName); 4] = [
    (0.25, PhaseName::FirstQuarter),
    (0.5, PhaseName::FullMoon),
    (0.75, PhaseName::LastQuarter),
    (1.0, PhaseName::NewMoon),
];

/// Whole days plus rounded hours until an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseDuration {
    pub days: u32,
    /// Rounded, so a value of 24 is possible and kept as is.
    pub hours: u32,
}

impl PhaseDuration {
    pub fn from_days(days: f64) -> Self {
        let whole = days.floor();
        Self {
            days: whole as u32,
            hours: ((days % 1.0) * 24.0).round() as u32,
        }
    }
}

impl fmt::Display for PhaseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days, {} hours", self.days, self.hours)
    }
}

/// When the next major phase happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NextPhaseForecast {
    pub date: NaiveDate,
    pub phase_name: PhaseName,
    pub duration: PhaseDuration,
    #[serde(skip)]
    pub days_until: f64,
}

/// Forecast the next major phase for a moon of `age_days` on `current_date`.
///
/// The forecast date is `current_date` plus the days until the phase, rounded up.
pub fn forecast_next_phase(age_days: f64, current_date: NaiveDate) -> NextPhaseForecast {
    let (target_age, phase_name) = MAJOR_PHASES
        .iter()
        .map(|(fraction, name)| (fraction * SYNODIC_MONTH_DAYS, *name))
        .find(|(age, _)| *age > age_days)
        .unwrap_or((
            MAJOR_PHASES[0].0 * SYNODIC_MONTH_DAYS + SYNODIC_MONTH_DAYS,
            MAJOR_PHASES[0].1,
        ));

    let mut days_until = target_age - age_days;
    if days_until < 0.0 {
        days_until += SYNODIC_MONTH_DAYS;
    }

    let date = current_date
        .checked_add_days(Days::new(days_until.ceil() as u64))
        .unwrap_or(current_date);

    NextPhaseForecast {
        date,
        phase_name,
        duration: PhaseDuration::from_days(days_until),
        days_until,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_moon_forecasts_first_quarter() {
        let forecast = forecast_next_phase(0.0, date(2024, 1, 11));
        assert_eq!(forecast.phase_name, PhaseName::FirstQuarter);
        let quarter = SYNODIC_MONTH_DAYS * 0.25; // 7.3826...
        assert!((forecast.days_until - quarter).abs() < 1e-12);
        assert_eq!(forecast.date, date(2024, 1, 19));
        assert_eq!(forecast.duration, PhaseDuration { days: 7, hours: 9 });
    }

    #[test]
    fn picks_first_phase_strictly_ahead() {
        let full = SYNODIC_MONTH_DAYS * 0.5;
        let forecast = forecast_next_phase(full, date(2024, 3, 1));
        assert_eq!(forecast.phase_name, PhaseName::LastQuarter);

        let forecast = forecast_next_phase(full - 1.0, date(2024, 3, 1));
        assert_eq!(forecast.phase_name, PhaseName::FullMoon);
        assert_eq!(forecast.date, date(2024, 3, 2));
        assert_eq!(forecast.duration.to_string(), "1 days, 0 hours");
    }

    #[test]
    fn late_waning_moon_forecasts_new_moon() {
        let forecast = forecast_next_phase(SYNODIC_MONTH_DAYS - 0.5, date(2024, 12, 31));
        assert_eq!(forecast.phase_name, PhaseName::NewMoon);
        assert_eq!(forecast.date, date(2025, 1, 1));
        assert_eq!(forecast.duration, PhaseDuration { days: 0, hours: 12 });
    }

    #[test]
    fn rounded_hours_are_not_carried() {
        let duration = PhaseDuration::from_days(6.99);
        assert_eq!(duration, PhaseDuration { days: 6, hours: 24 });
        assert_eq!(duration.to_string(), "6 days, 24 hours");
    }

    #[test]
    fn days_until_never_exceeds_a_quarter_cycle() {
        for step in 0..300 {
            let age = step as f64 * SYNODIC_MONTH_DAYS / 300.0;
            let forecast = forecast_next_phase(age, date(2030, 6, 1));
            assert!(forecast.days_until > 0.0);
            assert!(forecast.days_until <= SYNODIC_MONTH_DAYS * 0.25 + 1e-9);
            assert!(forecast.phase_name.is_major());
        }
    }
}
