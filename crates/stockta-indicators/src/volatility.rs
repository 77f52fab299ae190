//! Volatility indicators.

use serde::{Deserialize, Serialize};
use stockta_core::{Indicator, IndicatorSeries};

use crate::rolling::RollingWindowStats;

/// Bollinger Bands output series, each aligned to the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    /// Upper band
    #[serde(rename = "upper_band")]
    pub upper: IndicatorSeries,
    /// Middle band (SMA)
    #[serde(rename = "middle_band")]
    pub middle: IndicatorSeries,
    /// Lower band
    #[serde(rename = "lower_band")]
    pub lower: IndicatorSeries,
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands at a
/// specified number of sample standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    stats: RollingWindowStats,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(
            std_dev_multiplier >= 0.0 && std_dev_multiplier.is_finite(),
            "Std dev multiplier must be non-negative"
        );
        Self {
            stats: RollingWindowStats::new(period),
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerSeries;

    fn calculate(&self, data: &[f64]) -> BollingerSeries {
        let stats = self.stats.mean_and_std(data);
        let k = self.std_dev_multiplier;

        let upper = stats.mean.zip_with(&stats.std_dev, |mean, std| mean + k * std);
        let lower = stats.mean.zip_with(&stats.std_dev, |mean, std| mean - k * std);

        BollingerSeries {
            upper,
            middle: stats.mean,
            lower,
        }
    }

    fn warmup(&self) -> usize {
        self.stats.window() - 1
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_bands() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let result = bb.calculate(&data);
        assert_eq!(result.middle.len(), 30);
        assert_eq!(result.middle.first_defined(), Some(19));
        assert_eq!(result.upper.first_defined(), Some(19));
        assert_eq!(result.lower.first_defined(), Some(19));

        for i in 19..30 {
            let (upper, middle, lower) = (
                result.upper.get(i).unwrap(),
                result.middle.get(i).unwrap(),
                result.lower.get(i).unwrap(),
            );
            // Upper > Middle > Lower
            assert!(upper > middle);
            assert!(middle > lower);
            assert!((upper - middle - (middle - lower)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bollinger_known_width() {
        // Sample std of [2, 4, 6] is 2, so bands sit 4 away from the mean of 4
        let result = BollingerBands::with_params(3, 2.0).calculate(&[2.0, 4.0, 6.0]);

        assert!((result.middle.get(2).unwrap() - 4.0).abs() < 1e-12);
        assert!((result.upper.get(2).unwrap() - 8.0).abs() < 1e-12);
        assert!(result.lower.get(2).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_constant_price_collapses() {
        let result = BollingerBands::new().calculate(&[10.0; 25]);

        for i in 19..25 {
            assert_eq!(result.upper.get(i), Some(10.0));
            assert_eq!(result.middle.get(i), Some(10.0));
            assert_eq!(result.lower.get(i), Some(10.0));
        }
    }

    #[test]
    fn test_bollinger_band_order_for_any_multiplier() {
        let data: Vec<f64> = (0..60)
            .map(|i| 50.0 + (i as f64 * 0.7).sin() * 3.0 + (i % 7) as f64)
            .collect();

        for k in [0.0, 0.5, 1.0, 2.0, 3.5] {
            let result = BollingerBands::with_params(10, k).calculate(&data);
            for i in 0..data.len() {
                match (result.upper.get(i), result.middle.get(i), result.lower.get(i)) {
                    (Some(u), Some(m), Some(l)) => assert!(u >= m && m >= l),
                    (None, None, None) => assert!(i < 9),
                    other => panic!("misaligned bands at {}: {:?}", i, other),
                }
            }
        }
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let result = BollingerBands::new().calculate(&[1.0, 2.0, 3.0]);

        assert_eq!(result.upper, IndicatorSeries::undefined(3));
        assert_eq!(result.middle, IndicatorSeries::undefined(3));
        assert_eq!(result.lower, IndicatorSeries::undefined(3));
    }

    #[test]
    fn test_bollinger_period_one_has_no_bands() {
        // Sample deviation needs two points; the middle band is still defined
        let result = BollingerBands::with_params(1, 2.0).calculate(&[1.0, 2.0]);

        assert!(result.middle.is_fully_defined());
        assert_eq!(result.upper, IndicatorSeries::undefined(2));
    }

    #[test]
    fn test_bollinger_serialized_keys() {
        let result = BollingerBands::new().calculate(&[1.0]);
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("upper_band").is_some());
        assert!(json.get("middle_band").is_some());
        assert!(json.get("lower_band").is_some());
    }
}
