//! Lunar cycle calculations: phase, illumination, distance, rise/set,
//! next-phase forecasts, and calendar navigation helpers.
//!
//! The work lives in the `lunar_*` workspace crates; this crate stitches
//! them into one import path so front-ends (the `moon` CLI, tests, other
//! tools) share a single surface.

pub use lunar_config as config;
pub use lunar_core::{constants, geo, time, units};
pub use lunar_engine as engine;
pub use lunar_ephemeris as ephemeris;
pub use lunar_export as export;
