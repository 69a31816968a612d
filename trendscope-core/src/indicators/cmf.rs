//! Chaikin Money Flow (CMF).
//!
//! multiplier = ((close - low) - (high - close)) / (high - low)
//! CMF = sum(multiplier * volume, n) / sum(volume, n)
//! A bar with high == low gets multiplier 0 (not missing) before aggregation.
//! CMF is missing when the window's volume sum is zero.
//! Lookback: period - 1.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::rolling_sum;

#[derive(Debug, Clone)]
pub struct Cmf {
    period: usize,
    name: String,
}

impl Cmf {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CMF period must be >= 1");
        Self {
            period,
            name: format!("CMF_{period}"),
        }
    }
}

/// Close location value in [-1, 1]; zero for a zero-range bar.
pub fn money_flow_multiplier(high: f64, low: f64, close: f64) -> f64 {
    let m = ((close - low) - (high - close)) / (high - low);
    if m.is_finite() {
        m
    } else {
        0.0
    }
}

pub fn cmf_values(data: &PriceColumns, period: usize) -> Vec<f64> {
    let flow_volume: Vec<f64> = (0..data.len())
        .map(|i| money_flow_multiplier(data.high[i], data.low[i], data.close[i]) * data.volume[i])
        .collect();

    let flow_sum = rolling_sum(&flow_volume, period);
    let volume_sum = rolling_sum(&data.volume, period);
    flow_sum
        .iter()
        .zip(&volume_sum)
        .map(|(&f, &v)| if v == 0.0 { f64::NAN } else { f / v })
        .collect()
}

impl Indicator for Cmf {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[
            PriceField::High,
            PriceField::Low,
            PriceField::Close,
            PriceField::Volume,
        ]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        cmf_values(data, self.period)
    }
}
