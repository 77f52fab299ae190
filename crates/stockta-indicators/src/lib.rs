//! Technical indicator computation engine.
//!
//! This crate turns a validated price/volume [`Series`](stockta_core::Series)
//! into index-aligned derived series:
//! - Primitives: rolling mean/sample standard deviation, exponential smoothing
//! - Moving averages (MA5/MA10/MA20, volume MA)
//! - Momentum indicators (MACD, RSI)
//! - Volatility indicators (Bollinger Bands)
//! - Point price change
//!
//! [`IndicatorSet`] computes the whole battery, sequentially or as a
//! fan-out over blocking tasks, and assembles an [`IndicatorBundle`].

pub mod momentum;
pub mod moving_average;
pub mod price_change;
pub mod rolling;
pub mod set;
pub mod simd;
pub mod smoothing;
pub mod volatility;

pub use momentum::{Macd, MacdSeries, Rsi, RsiFlatPolicy};
pub use moving_average::{Sma, MA_WINDOWS};
pub use price_change::PriceChange;
pub use rolling::{RollingStats, RollingWindowStats};
pub use set::{IndicatorBundle, IndicatorParams, IndicatorSet};
pub use smoothing::ExponentialSmoother;
pub use volatility::{BollingerBands, BollingerSeries};
