//! Core types and traits for the indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Observation, Series)
//! - The aligned, optional-valued output type (IndicatorSeries)
//! - The Indicator trait implemented by every computation
//! - The error taxonomy shared by the engine and its collaborators

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, EngineError, EngineResult};
pub use traits::*;
pub use types::*;
