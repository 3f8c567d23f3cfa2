//! Lunar cycle engine: phase observations, rise/set estimates, next-phase
//! forecasts and the date helpers behind the dial and ring pickers.

pub mod calendar;
pub mod cycle;
pub mod engine;

pub use facade::*;

mod facade;
