//! Indicator report presentation.

use serde::Serialize;
use stockta_core::{DataError, IndicatorSeries};
use stockta_indicators::IndicatorBundle;

/// Decimal places used for the price change at the presentation boundary.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Presentation view of an indicator bundle.
///
/// Series keep full precision; only the scalar price change is rounded.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct IndicatorReport {
    bundle: IndicatorBundle,
}

impl IndicatorReport {
    /// Build the presentation view of a computed bundle.
    pub fn new(bundle: &IndicatorBundle) -> Self {
        let mut bundle = bundle.clone();
        bundle.price_change = bundle.price_change.rounded(DISPLAY_DECIMALS);
        Self { bundle }
    }

    /// The presented bundle.
    pub fn bundle(&self) -> &IndicatorBundle {
        &self.bundle
    }

    /// Export as JSON.
    pub fn to_json(&self) -> Result<String, DataError> {
        serde_json::to_string_pretty(self).map_err(|e| DataError::ExportError(e.to_string()))
    }

    /// Generate a text summary of the most recent values.
    pub fn summary(&self) -> String {
        let bundle = &self.bundle;
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   TECHNICAL INDICATORS                     \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("SERIES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Symbol:              {}\n", bundle.symbol));
        if let (Some(first), Some(last)) = (bundle.dates.first(), bundle.dates.last()) {
            s.push_str(&format!("  Range:               {} .. {}\n", first, last));
        }
        s.push_str(&format!("  Observations:        {}\n", bundle.len()));
        s.push('\n');

        s.push_str("LATEST VALUES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for (name, series) in bundle.columns() {
            s.push_str(&format!("  {:<20} {}\n", format!("{}:", name), latest(series)));
        }
        s.push('\n');

        s.push_str("PRICE CHANGE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        let change = bundle.price_change;
        s.push_str(&format!("  Change:              {:.2}\n", change.change));
        match change.change_percent {
            Some(pct) => s.push_str(&format!("  Change %:            {:.2}%\n", pct)),
            None => s.push_str("  Change %:            n/a\n"),
        }

        s
    }
}

fn latest(series: &IndicatorSeries) -> String {
    match series.last_defined() {
        Some(value) => format!("{:.4}", value),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockta_core::{Observation, Series};
    use stockta_indicators::IndicatorSet;

    fn bundle(closes: &[f64]) -> IndicatorBundle {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let observations = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Observation::new(start + chrono::Duration::days(i as i64), c, c, c, c, 500.0)
            })
            .collect();
        let series = Series::new("600000", observations).unwrap();
        IndicatorSet::default().compute(&series).unwrap()
    }

    #[test]
    fn test_report_rounds_price_change_only() {
        let raw = bundle(&[3.0, 3.1]);
        let report = IndicatorReport::new(&raw);

        assert!((report.bundle().price_change.change_percent.unwrap() - 3.33).abs() < 1e-12);
        assert_eq!(report.bundle().macd, raw.macd);
        assert!((raw.price_change.change_percent.unwrap() - 3.33).abs() > 1e-4);
    }

    #[test]
    fn test_report_json() {
        let report = IndicatorReport::new(&bundle(&[10.0, 11.0, 12.0]));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["dates"].as_array().unwrap().len(), 3);
        assert!(json["ma5"][2].is_null());
        assert_eq!(json["price_change"]["change"], 1.0);
        assert!(json["bollinger_bands"]["upper_band"].is_array());
    }

    #[test]
    fn test_summary() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let summary = IndicatorReport::new(&bundle(&closes)).summary();

        assert!(summary.contains("600000"));
        assert!(summary.contains("2023-01-01 .. 2023-01-30"));
        assert!(summary.contains("28.0000")); // ma5
        assert!(summary.contains("100.0000")); // rsi
        assert!(summary.contains("Change %:            3.45%"));
    }

    #[test]
    fn test_summary_marks_undefined() {
        let summary = IndicatorReport::new(&bundle(&[0.0, 1.0])).summary();

        assert!(summary.contains("n/a"));
        assert!(summary.contains("Change %:            n/a"));
    }
}
