//! Indicator trait and computed indicator values container.
//!
//! Indicators are pure functions: price columns in, one numeric series out.
//! Missing values are `f64::NAN` inside the engine and become `None` only at
//! the output boundary (see `enriched::IndicatorColumn`).

use crate::domain::{PriceColumns, PriceField};
use std::collections::HashMap;

/// Trait for single-series indicators.
///
/// `compute` returns a `Vec<f64>` of the same length as the input. The first
/// `lookback()` values are `f64::NAN` (warm-up); later positions may also be
/// NaN where the defining arithmetic is undefined.
///
/// # Look-ahead guard
/// No value at position t may depend on data from position t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Output column name (e.g. "SMA_20", "ATR_14").
    fn name(&self) -> &str;

    /// Number of leading positions that are always missing.
    fn lookback(&self) -> usize;

    /// Raw input columns read by `compute`.
    fn inputs(&self) -> &'static [PriceField];

    /// Compute the indicator over the entire series.
    fn compute(&self, data: &PriceColumns) -> Vec<f64>;
}

/// Container for computed indicator series, keyed by column name.
///
/// Filled step by step while a profile runs; composite steps read the
/// columns already present.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named series, replacing any previous one with that name.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value at a specific position.
    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(index).copied())
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Remove and return a series.
    pub fn take(&mut self, name: &str) -> Option<Vec<f64>> {
        self.series.remove(name)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
