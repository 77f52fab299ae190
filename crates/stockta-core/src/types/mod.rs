//! Core data types for the indicator engine.

mod indicator_series;
mod observation;

pub use indicator_series::IndicatorSeries;
pub use observation::{Observation, Series};
