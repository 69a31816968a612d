//! Relative Strength Index (RSI).
//!
//! Simple trailing means of gains and losses over the last `period` price changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (position 0 has no price change).
//! Edge cases: avg_loss == 0 with gains → 100; no gains and no losses → missing.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::{diff, rolling_mean};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("RSI_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        rsi_of_series(&data.close, self.period)
    }
}

pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let changes = diff(values);
    let gains: Vec<f64> = changes.iter().map(|&ch| upside(ch)).collect();
    let losses: Vec<f64> = changes.iter().map(|&ch| upside(-ch)).collect();

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| strength_index(g, l))
        .collect()
}

/// Positive part of a change; NaN stays NaN.
pub(crate) fn upside(change: f64) -> f64 {
    if change.is_nan() {
        f64::NAN
    } else if change > 0.0 {
        change
    } else {
        0.0
    }
}

/// `100 - 100 / (1 + up / down)` with the zero-denominator policy made explicit.
///
/// Shared by RSI (average gain/loss) and MFI (positive/negative money flow).
pub(crate) fn strength_index(up: f64, down: f64) -> f64 {
    if up.is_nan() || down.is_nan() {
        f64::NAN
    } else if down == 0.0 && up == 0.0 {
        f64::NAN // 0/0: no movement in the window
    } else if down == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + up / down)
    }
}
