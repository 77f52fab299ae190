//! Momentum indicators.

use serde::{Deserialize, Serialize};
use stockta_core::{Indicator, IndicatorSeries};

use crate::rolling::RollingWindowStats;
use crate::smoothing::ExponentialSmoother;

/// How RSI reports a window with neither gains nor losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiFlatPolicy {
    /// Report 50, the balance point between buyers and sellers.
    #[default]
    Neutral,
    /// Leave the position undefined.
    Undefined,
}

/// Relative Strength Index (RSI).
///
/// Average gain and average loss are simple rolling means of the positive
/// and negative close-to-close changes. Entry 0 has no change and the next
/// `period - 1` entries lack a full window, so the first `period` entries
/// are undefined. A window with losses of zero saturates at 100; a window
/// with no movement at all follows the [`RsiFlatPolicy`].
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    flat_policy: RsiFlatPolicy,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            flat_policy: RsiFlatPolicy::default(),
        }
    }

    /// Set the flat-window policy.
    pub fn with_flat_policy(mut self, flat_policy: RsiFlatPolicy) -> Self {
        self.flat_policy = flat_policy;
        self
    }

    fn value(&self, gain: f64, loss: f64) -> Option<f64> {
        if loss > 0.0 {
            let rs = gain / loss;
            return Some(100.0 - 100.0 / (1.0 + rs));
        }
        if gain > 0.0 {
            return Some(100.0);
        }
        match self.flat_policy {
            RsiFlatPolicy::Neutral => Some(50.0),
            RsiFlatPolicy::Undefined => None,
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = IndicatorSeries;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries {
        if data.len() < 2 {
            return IndicatorSeries::undefined(data.len());
        }

        // Price changes, indexed from observation 1
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);
        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let stats = RollingWindowStats::new(self.period);
        let avg_gains = stats.mean(&gains);
        let avg_losses = stats.mean(&losses);

        std::iter::once(None)
            .chain(
                avg_gains
                    .iter()
                    .zip(avg_losses.iter())
                    .map(|(gain, loss)| self.value(gain?, loss?)),
            )
            .collect()
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD output series, each aligned to the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    /// MACD line (fast EMA - slow EMA)
    pub macd_line: IndicatorSeries,
    /// Signal line (EMA of MACD)
    pub signal_line: IndicatorSeries,
    /// Histogram (MACD - Signal)
    #[serde(rename = "macd_hist")]
    pub histogram: IndicatorSeries,
}

/// MACD indicator.
///
/// Built entirely from exponential smoothing, so all three series are
/// defined from the first observation on.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: ExponentialSmoother,
    slow: ExponentialSmoother,
    signal: ExponentialSmoother,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom spans.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast: ExponentialSmoother::new(fast),
            slow: ExponentialSmoother::new(slow),
            signal: ExponentialSmoother::new(signal),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdSeries;

    fn calculate(&self, data: &[f64]) -> MacdSeries {
        let fast = self.fast.smooth(data);
        let slow = self.slow.smooth(data);

        let macd_line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
        let signal_line = self.signal.smooth(&macd_line);
        let histogram: Vec<f64> = macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(m, s)| m - s)
            .collect();

        MacdSeries {
            macd_line: IndicatorSeries::from_values(&macd_line),
            signal_line: IndicatorSeries::from_values(&signal_line),
            histogram: IndicatorSeries::from_values(&histogram),
        }
    }

    fn warmup(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
