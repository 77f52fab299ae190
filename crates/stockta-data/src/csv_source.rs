//! CSV data source.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use stockta_core::{DataError, Observation, Series};
use tracing::{debug, info};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "trade_date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open_price")]
    open: f64,
    #[serde(alias = "High", alias = "high_price")]
    high: f64,
    #[serde(alias = "Low", alias = "low_price")]
    low: f64,
    #[serde(alias = "Close", alias = "close_price", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume")]
    volume: f64,
    #[serde(alias = "Amount", alias = "turnover", default)]
    amount: Option<f64>,
}

/// CSV data source for daily observations.
///
/// Rows are taken in file order. Out-of-order or repeated dates are
/// reported as invalid input rather than silently sorted.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load and validate the whole file.
    pub fn load(&self, symbol: &str) -> Result<Series, DataError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let observations = read_observations(reader)?;
        info!(
            path = %self.path.display(),
            rows = observations.len(),
            "Loaded observations"
        );

        Ok(Series::new(symbol, observations)?)
    }

    /// Load and validate observations from any reader.
    pub fn load_from_reader<R: Read>(reader: R, symbol: &str) -> Result<Series, DataError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let observations = read_observations(reader)?;
        Ok(Series::new(symbol, observations)?)
    }
}

fn read_observations<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Observation>, DataError> {
    let mut observations = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let date = parse_date(&record.date)?;

        let mut observation = Observation::new(
            date,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        );
        observation.amount = record.amount;
        observations.push(observation);
    }

    debug!(rows = observations.len(), "Parsed CSV records");
    Ok(observations)
}

/// Parse a trading day in one of the common date layouts.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockta_core::EngineError;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("2024/01/15").unwrap(), expected);
        assert_eq!(parse_date("20240115").unwrap(), expected);
        assert_eq!(parse_date("01/15/2024").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15 10:30:00").unwrap(), expected);
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn test_load_from_reader() {
        let csv = "\
trade_date,open_price,high_price,low_price,close_price,volume,amount
2023-01-03,10.0,10.5,9.5,10.2,1000000,10200000.0
2023-01-04,10.2,10.8,10.1,10.6,1200000,
2023-01-05,10.6,10.9,10.4,10.5,900000,9450000.0
";
        let series = CsvDataSource::load_from_reader(csv.as_bytes(), "000001").unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "000001");
        assert_eq!(series.closes(), vec![10.2, 10.6, 10.5]);
        assert_eq!(series.volumes(), vec![1_000_000.0, 1_200_000.0, 900_000.0]);
        assert_eq!(series.observations()[0].amount, Some(10_200_000.0));
        assert_eq!(series.observations()[1].amount, None);
    }

    #[test]
    fn test_load_standard_headers_without_amount() {
        let csv = "\
Date,Open,High,Low,Close,Volume
2023-01-03,1,2,0.5,1.5,100
2023-01-04,1.5,2,1,1.8,200
";
        let series = CsvDataSource::load_from_reader(csv.as_bytes(), "X").unwrap();
        assert_eq!(series.closes(), vec![1.5, 1.8]);
    }

    #[test]
    fn test_out_of_order_rows_are_rejected() {
        let csv = "\
date,open,high,low,close,volume
2023-01-04,1,1,1,1,100
2023-01-03,1,1,1,1,100
";
        let err = CsvDataSource::load_from_reader(csv.as_bytes(), "X").unwrap_err();
        assert!(matches!(
            err,
            DataError::Invalid(EngineError::NonAscendingDates { index: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_rows_are_rejected() {
        let csv = "\
date,open,high,low,close,volume
2023-01-03,1,1,1,1,100
2023-01-03,1,1,1,1,100
";
        let err = CsvDataSource::load_from_reader(csv.as_bytes(), "X").unwrap_err();
        assert!(matches!(
            err,
            DataError::Invalid(EngineError::DuplicateDate { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let csv = "date,open,high,low,close,volume\n";
        let err = CsvDataSource::load_from_reader(csv.as_bytes(), "X").unwrap_err();
        assert!(matches!(err, DataError::Invalid(EngineError::EmptySeries)));
    }

    #[test]
    fn test_bad_number_is_parse_error() {
        let csv = "\
date,open,high,low,close,volume
2023-01-03,1,1,1,abc,100
";
        let err = CsvDataSource::load_from_reader(csv.as_bytes(), "X").unwrap_err();
        assert!(matches!(err, DataError::ParseError(_)));
    }

    #[test]
    fn test_missing_volume_column_is_parse_error() {
        let csv = "\
date,open,high,low,close
2023-01-03,1,1,1,1
2023-01-04,1,1,1,1.1
";
        let err = CsvDataSource::load_from_reader(csv.as_bytes(), "X").unwrap_err();
        assert!(matches!(err, DataError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvDataSource::new("/definitely/not/here.csv").err().unwrap();
        assert!(matches!(err, DataError::NotFound(_)));
    }
}
