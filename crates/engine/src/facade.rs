//! Re-exported APIs for consumers of the engine crate.

pub use crate::calendar::{
    ArcDate, ArcError, ArcInterval, DateArc, RangeError, RangeGuard, RotationSpeed,
};
pub use crate::cycle::forecast::{NextPhaseForecast, PhaseDuration};
pub use crate::cycle::naming::PhaseName;
pub use crate::cycle::phase::PhaseFigures;
pub use crate::cycle::times::{EventTime, RiseSetEstimate, RiseSetStrategy};
pub use crate::cycle::{PhaseObservation, observe};
pub use crate::engine::{EngineError, MoonEngine, Navigation, parse_calendar_date};
pub use lunar_core::geo::{CoordinateError, GeoCoordinate};
