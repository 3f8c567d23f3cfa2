//! Calendar-level helpers: the navigable window, dial navigation and date arcs.

pub mod arc;
pub mod guard;
pub mod navigation;

pub use arc::{
    ArcDate, ArcError, ArcInterval, DateArc, arc_bounds, day_month_label, generate_date_arc,
};
pub use guard::{RangeError, RangeGuard};
pub use navigation::{RotationSpeed, day_offset, navigate_by_rotation};
