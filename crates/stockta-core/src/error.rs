//! Error types for the indicator engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Hard failures of an engine call.
///
/// Insufficient history and degenerate arithmetic are never errors; they
/// show up as undefined entries (or guarded values) in the output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Series is empty")]
    EmptySeries,

    #[error("Dates must be strictly increasing: {current} at index {index} follows {previous}")]
    NonAscendingDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Duplicate date {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("Non-finite {field} at index {index}")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Indicator task failed: {0}")]
    Task(String),
}

/// Data source and export errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Invalid input: {0}")]
    Invalid(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
