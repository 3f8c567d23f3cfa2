//! Symmetric ribbons of dates for the ring picker.

use chrono::{Datelike, Days, NaiveDate};
use lunar_config::SUPPORTED_ARC_INTERVALS;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArcError {
    #[error("interval of {0} days is not one of 1, 3, 7 or 30")]
    InvalidInterval(u32),
    #[error("arc around {center} runs past the supported calendar")]
    OutOfCalendar { center: NaiveDate },
}

/// Stride between neighbouring arc dates. Only the picker's four steps exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u32")]
pub struct ArcInterval(u32);

impl ArcInterval {
    pub fn days(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ArcInterval {
    type Error = ArcError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        if SUPPORTED_ARC_INTERVALS.contains(&days) {
            Ok(Self(days))
        } else {
            Err(ArcError::InvalidInterval(days))
        }
    }
}

impl From<ArcInterval> for u32 {
    fn from(interval: ArcInterval) -> Self {
        interval.0
    }
}

/// One position on the arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcDate {
    pub date: NaiveDate,
    /// Steps from the centre; negative before it.
    pub step: i64,
    /// `day/month`, no year.
    pub label: String,
}

/// Odd-length, centre-symmetric sequence of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateArc {
    pub center: NaiveDate,
    pub interval: ArcInterval,
    pub dates: Vec<ArcDate>,
}

impl DateArc {
    pub fn labels(&self) -> Vec<&str> {
        self.dates.iter().map(|d| d.label.as_str()).collect()
    }

    /// The element at the centre of the arc.
    pub fn middle(&self) -> Option<&ArcDate> {
        self.dates.get(self.dates.len() / 2)
    }
}

/// Day/month label for an arc position.
pub fn day_month_label(date: NaiveDate) -> String {
    format!("{}/{}", date.day(), date.month())
}

/// First and last dates of the arc, without building it.
pub fn arc_bounds(
    center: NaiveDate,
    interval: ArcInterval,
    total_dates: u32,
) -> Result<(NaiveDate, NaiveDate), ArcError> {
    let reach = Days::new(u64::from(total_dates / 2) * u64::from(interval.days()));
    let first = center
        .checked_sub_days(reach)
        .ok_or(ArcError::OutOfCalendar { center })?;
    let last = center
        .checked_add_days(reach)
        .ok_or(ArcError::OutOfCalendar { center })?;
    Ok((first, last))
}

/// Build `total_dates / 2` steps either side of `center`, centre included.
pub fn generate_date_arc(
    center: NaiveDate,
    interval: ArcInterval,
    total_dates: u32,
) -> Result<DateArc, ArcError> {
    let half = i64::from(total_dates / 2);
    let stride = u64::from(interval.days());

    let dates = (-half..=half)
        .map(|step| {
            let span = Days::new(stride * step.unsigned_abs());
            let date = if step < 0 {
                center.checked_sub_days(span)
            } else {
                center.checked_add_days(span)
            }
            .ok_or(ArcError::OutOfCalendar { center })?;
            Ok(ArcDate {
                date,
                step,
                label: day_month_label(date),
            })
        })
        .collect::<Result<Vec<_>, ArcError>>()?;

    Ok(DateArc {
        center,
        interval,
        dates,
    })
}
