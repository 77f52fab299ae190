//! Index-aligned indicator output with explicit undefined entries.

use serde::{Deserialize, Serialize};

/// A derived series aligned one-to-one with its input.
///
/// Entry `i` corresponds to input observation `i`. `None` marks a position
/// where the indicator is undefined (warm-up window, degenerate arithmetic).
/// `Some` values are always finite. Serialises as a JSON array with `null`
/// for undefined entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(Vec<Option<f64>>);

impl IndicatorSeries {
    /// Wrap raw values; non-finite values are stored as undefined.
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect(),
        )
    }

    /// A series of `len` undefined entries.
    pub fn undefined(len: usize) -> Self {
        Self(vec![None; len])
    }

    /// A fully defined series.
    pub fn from_values(values: &[f64]) -> Self {
        Self(values.iter().map(|&v| Some(v).filter(|x| x.is_finite())).collect())
    }

    /// Number of entries (equals the input length).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the series has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, `None` if undefined or out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Underlying entries.
    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().copied()
    }

    /// Index of the first defined entry.
    pub fn first_defined(&self) -> Option<usize> {
        self.0.iter().position(Option::is_some)
    }

    /// The most recent defined value.
    pub fn last_defined(&self) -> Option<f64> {
        self.0.iter().rev().find_map(|v| *v)
    }

    /// Number of defined entries.
    pub fn defined_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    /// Check that every entry is defined.
    pub fn is_fully_defined(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Combine two aligned series element-wise.
    ///
    /// Undefined on either side yields undefined.
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        debug_assert_eq!(self.len(), other.len());
        Self::new(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| Some(f((*a)?, (*b)?)))
                .collect(),
        )
    }

    /// Consume the series, returning the entries.
    pub fn into_inner(self) -> Vec<Option<f64>> {
        self.0
    }
}

impl From<Vec<Option<f64>>> for IndicatorSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Option<f64>> for IndicatorSeries {
    fn from_iter<T: IntoIterator<Item = Option<f64>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_becomes_undefined() {
        let series = IndicatorSeries::new(vec![Some(1.0), Some(f64::NAN), Some(f64::INFINITY), None]);

        assert_eq!(series.len(), 4);
        assert_eq!(series.get(0), Some(1.0));
        assert_eq!(series.get(1), None);
        assert_eq!(series.get(2), None);
        assert_eq!(series.defined_count(), 1);
    }

    #[test]
    fn test_defined_queries() {
        let series = IndicatorSeries::new(vec![None, None, Some(2.0), Some(3.0), None]);

        assert_eq!(series.first_defined(), Some(2));
        assert_eq!(series.last_defined(), Some(3.0));
        assert!(!series.is_fully_defined());
        assert!(IndicatorSeries::from_values(&[1.0, 2.0]).is_fully_defined());
        assert_eq!(IndicatorSeries::undefined(3).first_defined(), None);
    }

    #[test]
    fn test_zip_with_propagates_undefined() {
        let a = IndicatorSeries::new(vec![None, Some(2.0), Some(5.0)]);
        let b = IndicatorSeries::new(vec![Some(1.0), None, Some(1.5)]);

        let sum = a.zip_with(&b, |x, y| x + y);
        assert_eq!(sum.values(), &[None, None, Some(6.5)]);
    }

    #[test]
    fn test_serializes_undefined_as_null() {
        let series = IndicatorSeries::new(vec![None, Some(1.5)]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, "[null,1.5]");

        let back: IndicatorSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }
}
