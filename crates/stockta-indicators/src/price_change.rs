//! Point price change between the last two closes.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockta_core::{EngineError, EngineResult};

/// Change of the latest close against the previous one.
///
/// Values are kept at full precision; use [`PriceChange::rounded`] at the
/// presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    /// Latest close minus previous close
    pub change: f64,
    /// Change relative to the previous close, in percent.
    /// Undefined when the previous close is zero.
    pub change_percent: Option<f64>,
}

impl PriceChange {
    /// Compute from a close-price column.
    ///
    /// With a single close the previous close is the close itself, giving a
    /// zero change. An empty column is invalid input.
    pub fn from_closes(closes: &[f64]) -> EngineResult<Self> {
        let Some(&current) = closes.last() else {
            return Err(EngineError::EmptySeries);
        };
        let previous = if closes.len() > 1 {
            closes[closes.len() - 2]
        } else {
            current
        };

        let change = current - previous;
        let change_percent = if previous == 0.0 {
            None
        } else {
            Some(change / previous * 100.0)
        };

        Ok(Self {
            change,
            change_percent,
        })
    }

    /// Round both fields to `dp` decimal places (banker's rounding).
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            change: round_dp(self.change, dp),
            change_percent: self.change_percent.map(|p| round_dp(p, dp)),
        }
    }
}

fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::try_from(value)
        .ok()
        .and_then(|d| d.round_dp(dp).to_f64())
        .unwrap_or(value)
}
