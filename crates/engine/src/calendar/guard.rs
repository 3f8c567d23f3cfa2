//! Navigable horizon and range-size limits.

use chrono::{Months, NaiveDate};
use lunar_config::LimitsConfig;
use thiserror::Error;

/// Rejections raised before any per-day work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("date {date} is outside the supported window {earliest}..={latest}")]
    DateOutOfRange {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("date range spans {days} days; at most {max_days} are allowed")]
    DateRangeTooLarge { days: i64, max_days: u32 },
}

/// Checks dates against a window centred on "today" and caps range spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeGuard {
    pub max_years: u32,
    pub max_span_days: u32,
}

impl Default for RangeGuard {
    fn default() -> Self {
        Self::from(LimitsConfig::default())
    }
}

impl From<LimitsConfig> for RangeGuard {
    fn from(limits: LimitsConfig) -> Self {
        Self {
            max_years: limits.max_years_from_today,
            max_span_days: limits.max_span_days,
        }
    }
}

impl RangeGuard {
    /// Inclusive window of accepted dates around `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let months = Months::new(self.max_years.saturating_mul(12));
        let earliest = today.checked_sub_months(months).unwrap_or(NaiveDate::MIN);
        let latest = today.checked_add_months(months).unwrap_or(NaiveDate::MAX);
        (earliest, latest)
    }

    /// Accept `date` only if it lies within the window around `today`.
    pub fn check_date(&self, date: NaiveDate, today: NaiveDate) -> Result<(), RangeError> {
        let (earliest, latest) = self.window(today);
        if date < earliest || date > latest {
            log::warn!("rejecting {date}: outside {earliest}..={latest}");
            return Err(RangeError::DateOutOfRange {
                date,
                earliest,
                latest,
            });
        }
        Ok(())
    }

    /// Validate a range query, returning its span in days.
    ///
    /// Ordering and size are checked first, then both endpoints against the window.
    pub fn check_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<i64, RangeError> {
        if start > end {
            return Err(RangeError::InvalidDateRange { start, end });
        }
        let days = (end - start).num_days();
        if days > i64::from(self.max_span_days) {
            return Err(RangeError::DateRangeTooLarge {
                days,
                max_days: self.max_span_days,
            });
        }
        self.check_date(start, today)?;
        self.check_date(end, today)?;
        Ok(days)
    }
}
