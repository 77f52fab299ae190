//! Data collaborators around the indicator engine.
//!
//! - CSV loading of daily observations into a validated series
//! - Presentation of an indicator bundle (JSON, text summary)
//! - CSV export of the aligned bundle

mod csv_source;
mod export;
mod report;

pub use csv_source::CsvDataSource;
pub use export::{default_file_name, export_csv, export_csv_file};
pub use report::{IndicatorReport, DISPLAY_DECIMALS};

use std::path::Path;
use stockta_core::{DataError, Series};

/// Load a series from a CSV file.
pub fn load_csv(path: impl AsRef<Path>, symbol: &str) -> Result<Series, DataError> {
    let source = CsvDataSource::new(path)?;
    source.load(symbol)
}
