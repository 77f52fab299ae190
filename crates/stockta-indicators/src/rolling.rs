//! Sliding-window mean and sample standard deviation.

use stockta_core::IndicatorSeries;

use crate::simd::shifted_sums_simd;

/// Rolling mean and standard deviation output.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingStats {
    /// Arithmetic mean of each window
    pub mean: IndicatorSeries,
    /// Sample standard deviation (divisor `w - 1`) of each window
    pub std_dev: IndicatorSeries,
}

/// Sliding-window statistics over a fixed window length.
///
/// Entry `i` describes `data[i + 1 - window..=i]`; the first `window - 1`
/// entries are undefined. The standard deviation uses the sample divisor,
/// so it is undefined everywhere for a window of one.
///
/// Runs in O(N) with running sums of values shifted by a reference value
/// taken from the window. Each time the window has fully turned over, the
/// reference moves to the oldest value in the window and the sums are
/// recomputed exactly, so neither accumulated drift nor a level far from the
/// start of the series degrades the deviation. A window made of a single
/// repeated value reports that value and a zero deviation exactly.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindowStats {
    window: usize,
}

impl RollingWindowStats {
    /// Create rolling statistics with the given window length.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "Window must be greater than 0");
        Self { window }
    }

    /// Window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Rolling mean only.
    pub fn mean(&self, data: &[f64]) -> IndicatorSeries {
        self.run(data, false).mean
    }

    /// Rolling sample standard deviation only.
    pub fn std_dev(&self, data: &[f64]) -> IndicatorSeries {
        self.run(data, true).std_dev
    }

    /// Rolling mean and sample standard deviation in one pass.
    pub fn mean_and_std(&self, data: &[f64]) -> RollingStats {
        self.run(data, true)
    }

    fn run(&self, data: &[f64], with_std: bool) -> RollingStats {
        let len = data.len();
        let window = self.window;
        let mut mean = vec![None; len];
        let mut std_dev = vec![None; len];

        if len < window {
            return RollingStats {
                mean: IndicatorSeries::new(mean),
                std_dev: IndicatorSeries::new(std_dev),
            };
        }

        let window_f64 = window as f64;
        let mut shift = data[0];
        let (mut sum, mut sum_sq) = shifted_sums_simd(&data[..window], shift);

        // Length of the run of identical values ending at the current index
        let mut run = 1;
        for i in 1..window {
            run = if data[i] == data[i - 1] { run + 1 } else { 1 };
        }

        for i in (window - 1)..len {
            if i >= window {
                run = if data[i] == data[i - 1] { run + 1 } else { 1 };

                let start = i + 1 - window;
                if start % window == 0 {
                    shift = data[start];
                    (sum, sum_sq) = shifted_sums_simd(&data[start..=i], shift);
                } else {
                    let incoming = data[i] - shift;
                    let outgoing = data[i - window] - shift;
                    sum += incoming - outgoing;
                    sum_sq += incoming * incoming - outgoing * outgoing;
                }
            }

            if run >= window {
                // Flat window: report exact values and realign the sums
                let value = data[i];
                let diff = value - shift;
                sum = window_f64 * diff;
                sum_sq = window_f64 * diff * diff;
                mean[i] = Some(value);
                if with_std && window > 1 {
                    std_dev[i] = Some(0.0);
                }
                continue;
            }

            mean[i] = Some(shift + sum / window_f64);

            if with_std && window > 1 {
                let variance = (sum_sq - sum * sum / window_f64) / (window_f64 - 1.0);
                std_dev[i] = Some(variance.max(0.0).sqrt());
            }
        }

        RollingStats {
            mean: IndicatorSeries::new(mean),
            std_dev: IndicatorSeries::new(std_dev),
        }
    }
}
