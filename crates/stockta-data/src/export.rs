//! CSV export of an indicator bundle.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use stockta_core::DataError;
use stockta_indicators::IndicatorBundle;
use tracing::info;

/// Write one row per date with one column per series.
///
/// Undefined entries are written as empty cells.
pub fn export_csv<W: Write>(bundle: &IndicatorBundle, writer: W) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_writer(writer);
    let columns = bundle.columns();

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("date");
    header.extend(columns.iter().map(|(name, _)| *name));
    writer
        .write_record(&header)
        .map_err(|e| DataError::ExportError(e.to_string()))?;

    for (i, date) in bundle.dates.iter().enumerate() {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(date.format("%Y-%m-%d").to_string());
        for (_, series) in &columns {
            row.push(series.get(i).map(|v| v.to_string()).unwrap_or_default());
        }
        writer
            .write_record(&row)
            .map_err(|e| DataError::ExportError(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the bundle as CSV to `path`.
pub fn export_csv_file(bundle: &IndicatorBundle, path: impl AsRef<Path>) -> Result<(), DataError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    export_csv(bundle, file)?;
    info!(path = %path.display(), rows = bundle.len(), "Exported indicators");
    Ok(())
}

/// Timestamped file name for an export of `symbol`.
pub fn default_file_name(symbol: &str, at: NaiveDateTime, extension: &str) -> String {
    format!(
        "analysis_{}_{}.{}",
        symbol,
        at.format("%Y%m%d_%H%M%S"),
        extension
    )
}
