//! On-Balance Volume (OBV).
//!
//! Running total of sign(close[t] - close[t-1]) * volume[t]; position 0 adds 0.
//! Defined from position 0. A missing close or volume makes that position
//! missing without disturbing the running total.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;

#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }
}

pub fn obv_values(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let steps = close.iter().enumerate().map(|(i, &c)| {
        if i == 0 {
            return 0.0;
        }
        let change = c - close[i - 1];
        if change.is_nan() {
            f64::NAN
        } else if change > 0.0 {
            volume[i]
        } else if change < 0.0 {
            -volume[i]
        } else {
            0.0
        }
    });

    steps
        .scan(0.0_f64, |total, step| {
            if step.is_nan() {
                return Some(f64::NAN);
            }
            *total += step;
            Some(*total)
        })
        .collect()
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        "OBV"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::Close, PriceField::Volume]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        obv_values(&data.close, &data.volume)
    }
}
