//! Indicator trait definition.

/// Trait for technical indicators.
///
/// Indicators transform an input column (close prices or volumes) into one
/// or more derived series of the same length. Positions without enough
/// history are undefined rather than an error.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input column, oldest first
    ///
    /// # Returns
    /// Output aligned to `data`: entry `i` describes `data[i]`
    fn calculate(&self, data: &[f64]) -> Self::Output;

    /// Number of leading positions that are always undefined.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Check whether `len` points yield at least one defined value.
    fn has_enough_data(&self, len: usize) -> bool {
        len > self.warmup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = Vec<Option<f64>>;

        fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
            (0..data.len())
                .map(|i| {
                    if i + 1 < self.period {
                        None
                    } else {
                        Some(data[i + 1 - self.period..=i].iter().sum())
                    }
                })
                .collect()
        }

        fn warmup(&self) -> usize {
            self.period - 1
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_has_enough_data() {
        let indicator = TestIndicator { period: 5 };

        assert!(!indicator.has_enough_data(3));
        assert!(!indicator.has_enough_data(4));
        assert!(indicator.has_enough_data(5));
    }

    #[test]
    fn test_indicator_calculate_is_aligned() {
        let indicator = TestIndicator { period: 3 };
        let result = indicator.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 5);
        assert_eq!(&result[..2], &[None, None]);
        assert!((result[2].unwrap() - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[4].unwrap() - 12.0).abs() < 0.001); // 3+4+5
    }
}
