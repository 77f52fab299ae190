//! Moving average indicators.

use stockta_core::{Indicator, IndicatorSeries};

use crate::rolling::RollingWindowStats;

/// Close-price moving average windows reported in every bundle.
pub const MA_WINDOWS: [usize; 3] = [5, 10, 20];

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values. Applied to closes
/// for MA5/MA10/MA20 and to volumes for the volume average.
#[derive(Debug, Clone)]
pub struct Sma {
    stats: RollingWindowStats,
    name: String,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        Self {
            stats: RollingWindowStats::new(period),
            name: format!("MA{}", period),
        }
    }

    /// Create an SMA labelled as a volume average.
    pub fn volume(period: usize) -> Self {
        Self {
            stats: RollingWindowStats::new(period),
            name: format!("VOLUME_MA{}", period),
        }
    }

    /// Averaging period.
    pub fn period(&self) -> usize {
        self.stats.window()
    }
}

impl Indicator for Sma {
    type Output = IndicatorSeries;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries {
        self.stats.mean(data)
    }

    fn warmup(&self) -> usize {
        self.stats.window() - 1
    }

    fn name(&self) -> &str {
        &self.name
    }
}
