//! Exponential smoothing.

use stockta_core::{Indicator, IndicatorSeries};

/// Exponential Moving Average in its non-adjusted recursive form.
///
/// `alpha = 2 / (span + 1)`, `ema[0] = x[0]` and
/// `ema[i] = alpha * x[i] + (1 - alpha) * ema[i - 1]`. Unlike the rolling
/// mean there is no warm-up gap: every position is defined.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialSmoother {
    span: usize,
    alpha: f64,
}

impl ExponentialSmoother {
    /// Create a smoother with the given span.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        let alpha = 2.0 / (span as f64 + 1.0);
        Self { span, alpha }
    }

    /// Span the smoothing factor was derived from.
    pub fn span(&self) -> usize {
        self.span
    }

    /// Smoothing factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Smooth `data` in a single forward pass.
    pub fn smooth(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let Some((&first, rest)) = data.split_first() else {
            return result;
        };

        let one_minus_alpha = 1.0 - self.alpha;
        let mut ema = first;
        result.push(ema);

        for &value in rest {
            ema = value * self.alpha + ema * one_minus_alpha;
            result.push(ema);
        }

        result
    }
}

impl Indicator for ExponentialSmoother {
    type Output = IndicatorSeries;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries {
        IndicatorSeries::from_values(&self.smooth(data))
    }

    fn warmup(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
