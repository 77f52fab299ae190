//! The full indicator battery and its aligned output bundle.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockta_core::{EngineError, EngineResult, Indicator, IndicatorSeries, Series};
use tokio::task::{self, JoinHandle};
use tracing::{debug, instrument};

use crate::momentum::{Macd, MacdSeries, Rsi, RsiFlatPolicy};
use crate::moving_average::{Sma, MA_WINDOWS};
use crate::price_change::PriceChange;
use crate::volatility::{BollingerBands, BollingerSeries};

/// Tunable parameters of the indicator battery.
///
/// The close-price moving averages always use [`MA_WINDOWS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub volume_ma_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub rsi_flat_policy: RsiFlatPolicy,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            volume_ma_window: 5,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            rsi_flat_policy: RsiFlatPolicy::Neutral,
            bollinger_period: 20,
            bollinger_k: 2.0,
        }
    }
}

impl IndicatorParams {
    /// Reject parameters no indicator can be built from.
    pub fn validate(&self) -> EngineResult<()> {
        let windows = [
            ("volume_ma_window", self.volume_ma_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("rsi_period", self.rsi_period),
            ("bollinger_period", self.bollinger_period),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(EngineError::InvalidParameter(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        if !self.bollinger_k.is_finite() || self.bollinger_k < 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "bollinger_k must be a non-negative number, got {}",
                self.bollinger_k
            )));
        }

        Ok(())
    }

    /// Largest warm-up among the windowed indicators, plus one.
    ///
    /// Series shorter than this produce at least one all-undefined output.
    pub fn longest_window(&self) -> usize {
        MA_WINDOWS
            .into_iter()
            .chain([self.volume_ma_window, self.bollinger_period, self.rsi_period + 1])
            .max()
            .unwrap_or(1)
    }

    fn macd(&self) -> Macd {
        Macd::with_periods(self.macd_fast, self.macd_slow, self.macd_signal)
    }

    fn rsi(&self) -> Rsi {
        Rsi::new(self.rsi_period).with_flat_policy(self.rsi_flat_policy)
    }

    fn bollinger(&self) -> BollingerBands {
        BollingerBands::with_params(self.bollinger_period, self.bollinger_k)
    }

    fn volume_ma(&self) -> Sma {
        Sma::volume(self.volume_ma_window)
    }
}

/// Every indicator for one series, index-aligned to its observations.
///
/// Serialises with the keys `dates`, `ma5`, `ma10`, `ma20`, `macd`, `rsi`,
/// `bollinger_bands`, `volume_ma` and `price_change`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub ma5: IndicatorSeries,
    pub ma10: IndicatorSeries,
    pub ma20: IndicatorSeries,
    pub macd: MacdSeries,
    pub rsi: IndicatorSeries,
    pub bollinger_bands: BollingerSeries,
    pub volume_ma: IndicatorSeries,
    pub price_change: PriceChange,
}

impl IndicatorBundle {
    /// Number of aligned positions.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the bundle has no positions.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Flat named view of every series, in export order.
    pub fn columns(&self) -> Vec<(&'static str, &IndicatorSeries)> {
        vec![
            ("ma5", &self.ma5),
            ("ma10", &self.ma10),
            ("ma20", &self.ma20),
            ("macd_line", &self.macd.macd_line),
            ("signal_line", &self.macd.signal_line),
            ("macd_hist", &self.macd.histogram),
            ("rsi", &self.rsi),
            ("upper_band", &self.bollinger_bands.upper),
            ("middle_band", &self.bollinger_bands.middle),
            ("lower_band", &self.bollinger_bands.lower),
            ("volume_ma", &self.volume_ma),
        ]
    }
}

/// Computes the full indicator battery for a series.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    params: IndicatorParams,
}

impl IndicatorSet {
    /// Create an indicator set, validating its parameters.
    pub fn new(params: IndicatorParams) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters in use.
    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Compute every indicator on the calling thread.
    #[instrument(skip_all, fields(symbol = series.symbol(), points = series.len()))]
    pub fn compute(&self, series: &Series) -> EngineResult<IndicatorBundle> {
        let closes = series.closes();
        let volumes = series.volumes();
        let price_change = PriceChange::from_closes(&closes)?;

        let [ma5, ma10, ma20] = MA_WINDOWS.map(|w| run(&Sma::new(w), &closes));

        let bundle = IndicatorBundle {
            symbol: series.symbol().to_string(),
            dates: series.dates(),
            ma5,
            ma10,
            ma20,
            macd: run(&self.params.macd(), &closes),
            rsi: run(&self.params.rsi(), &closes),
            bollinger_bands: run(&self.params.bollinger(), &closes),
            volume_ma: run(&self.params.volume_ma(), &volumes),
            price_change,
        };

        debug!("Computed indicator bundle");
        Ok(bundle)
    }

    /// Compute every indicator as independent blocking tasks.
    ///
    /// Each indicator reads shared immutable columns and fills its own
    /// slot; the results equal [`IndicatorSet::compute`].
    #[instrument(skip_all, fields(symbol = series.symbol(), points = series.len()))]
    pub async fn compute_concurrent(&self, series: &Series) -> EngineResult<IndicatorBundle> {
        let closes: Arc<[f64]> = series.closes().into();
        let volumes: Arc<[f64]> = series.volumes().into();
        let price_change = PriceChange::from_closes(&closes)?;
        let params = self.params;

        let (ma5, ma10, ma20, macd, rsi, bollinger_bands, volume_ma) = tokio::try_join!(
            spawn(Sma::new(MA_WINDOWS[0]), closes.clone()),
            spawn(Sma::new(MA_WINDOWS[1]), closes.clone()),
            spawn(Sma::new(MA_WINDOWS[2]), closes.clone()),
            spawn(params.macd(), closes.clone()),
            spawn(params.rsi(), closes.clone()),
            spawn(params.bollinger(), closes),
            spawn(params.volume_ma(), volumes),
        )
        .map_err(|e| EngineError::Task(e.to_string()))?;

        debug!("Computed indicator bundle concurrently");
        Ok(IndicatorBundle {
            symbol: series.symbol().to_string(),
            dates: series.dates(),
            ma5,
            ma10,
            ma20,
            macd,
            rsi,
            bollinger_bands,
            volume_ma,
            price_change,
        })
    }
}

fn run<I: Indicator>(indicator: &I, data: &[f64]) -> I::Output {
    if !indicator.has_enough_data(data.len()) {
        debug!(
            indicator = indicator.name(),
            warmup = indicator.warmup(),
            points = data.len(),
            "Not enough history, output is undefined"
        );
    }
    indicator.calculate(data)
}

fn spawn<I>(indicator: I, data: Arc<[f64]>) -> JoinHandle<I::Output>
where
    I: Indicator + 'static,
    I::Output: Send + 'static,
{
    task::spawn_blocking(move || run(&indicator, &data))
}
