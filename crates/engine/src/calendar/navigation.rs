//! Rotation-to-date mapping for the dial control.
//!
//! Every 30 degrees of rotation is one step: a day in slow mode, a week in fast mode.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use lunar_config::SpeedConfig;
use serde::Serialize;

/// Degrees of rotation per navigation step.
pub const DEGREES_PER_STEP: f64 = 30.0;

/// Dial speed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationSpeed {
    #[default]
    Slow,
    Fast,
}

impl RotationSpeed {
    /// Days per 30-degree step.
    pub fn days_per_step(self) -> i64 {
        match self {
            Self::Slow => 1,
            Self::Fast => 7,
        }
    }
}

impl From<SpeedConfig> for RotationSpeed {
    fn from(config: SpeedConfig) -> Self {
        match config {
            SpeedConfig::Slow => Self::Slow,
            SpeedConfig::Fast => Self::Fast,
        }
    }
}

impl fmt::Display for RotationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slow => "slow",
            Self::Fast => "fast",
        })
    }
}

/// Error returned for a speed other than `slow` or `fast`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown speed `{0}`; expected `slow` or `fast`")]
pub struct UnknownSpeed(pub String);

impl FromStr for RotationSpeed {
    type Err = UnknownSpeed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "fast" => Ok(Self::Fast),
            _ => Err(UnknownSpeed(s.to_string())),
        }
    }
}

/// Whole-day offset for a rotation. Halves round away from zero.
pub fn day_offset(angle_degrees: f64, speed: RotationSpeed) -> i64 {
    ((angle_degrees / DEGREES_PER_STEP) * speed.days_per_step() as f64).round() as i64
}

/// Shift `base` by the rotation's day offset. `None` if the result leaves the calendar.
pub fn navigate_by_rotation(
    base: NaiveDate,
    angle_degrees: f64,
    speed: RotationSpeed,
) -> Option<NaiveDate> {
    let offset = day_offset(angle_degrees, speed);
    if offset >= 0 {
        base.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        base.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}
