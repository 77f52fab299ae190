//! Daily OHLCV observations and the validated series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One trading day of price and volume data.
///
/// Only `close` and `volume` feed the indicators; the remaining fields are
/// carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading day
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
    /// Traded amount (turnover), when the source provides it
    pub amount: Option<f64>,
}

impl Observation {
    /// Create a new observation without a traded amount.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            amount: None,
        }
    }

    /// Attach the traded amount.
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Date-ordered observations for a single security.
///
/// A `Series` can only be built through [`Series::new`], which enforces a
/// non-empty, strictly ascending, duplicate-free date column and finite
/// close/volume values. Indicators therefore never re-validate their input.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    symbol: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Validate and wrap a list of observations.
    pub fn new(symbol: impl Into<String>, observations: Vec<Observation>) -> EngineResult<Self> {
        if observations.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        for (index, obs) in observations.iter().enumerate() {
            if !obs.close.is_finite() {
                return Err(EngineError::NonFiniteValue {
                    index,
                    field: "close",
                });
            }
            if !obs.volume.is_finite() {
                return Err(EngineError::NonFiniteValue {
                    index,
                    field: "volume",
                });
            }
        }

        for (offset, pair) in observations.windows(2).enumerate() {
            let (previous, current) = (pair[0].date, pair[1].date);
            let index = offset + 1;
            if current == previous {
                return Err(EngineError::DuplicateDate {
                    index,
                    date: current,
                });
            }
            if current < previous {
                return Err(EngineError::NonAscendingDates {
                    index,
                    previous,
                    current,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            observations,
        })
    }

    /// Symbol identifier.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of observations (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations, oldest first.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The oldest observation.
    pub fn first(&self) -> &Observation {
        &self.observations[0]
    }

    /// The most recent observation.
    pub fn last(&self) -> &Observation {
        &self.observations[self.observations.len() - 1]
    }

    /// Extract dates as a vector.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.volume).collect()
    }

    /// Select the observations within an inclusive date range.
    ///
    /// Either bound may be omitted. An empty selection is an error.
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> EngineResult<Self> {
        let selected: Vec<Observation> = self
            .observations
            .iter()
            .filter(|o| start.map_or(true, |s| o.date >= s))
            .filter(|o| end.map_or(true, |e| o.date <= e))
            .copied()
            .collect();

        if selected.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        Ok(Self {
            symbol: self.symbol.clone(),
            observations: selected,
        })
    }
}
