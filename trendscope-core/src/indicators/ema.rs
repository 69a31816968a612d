//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! Seed: EMA[0] = close[0], so the series is defined from position 0 and
//! early values lean toward the seed.
//! Lookback: 0.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("EMA_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        ema_of_series(&data.close, self.period)
    }
}

/// EMA of an arbitrary series, seeded with its first value.
///
/// Used directly by composed indicators (MACD line and signal). A NaN input
/// yields NaN at that position and leaves the running average untouched; a
/// leading NaN run delays the seed to the first valid value.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }
    let alpha = 2.0 / (period as f64 + 1.0);

    values
        .iter()
        .scan(None::<f64>, |prev, &v| {
            if v.is_nan() {
                return Some(f64::NAN);
            }
            let next = match *prev {
                None => v,
                Some(p) => alpha * v + (1.0 - alpha) * p,
            };
            *prev = Some(next);
            Some(next)
        })
        .collect()
}
