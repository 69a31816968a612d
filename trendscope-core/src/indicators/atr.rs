//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR is the simple rolling mean of TR over `period`.
//! TR[0] has no previous close and is taken as high-low, so ATR is defined
//! from index period-1.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::rolling_mean;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("ATR_{period}"),
        }
    }
}

/// Compute the True Range series.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = close.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    tr[0] = high[0] - low[0];

    for i in 1..n {
        let h = high[i];
        let l = low[i];
        let pc = close[i - 1];
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }

    tr
}

pub fn atr_values(data: &PriceColumns, period: usize) -> Vec<f64> {
    let tr = true_range(&data.high, &data.low, &data.close);
    rolling_mean(&tr, period)
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::High, PriceField::Low, PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        atr_values(data, self.period)
    }
}
