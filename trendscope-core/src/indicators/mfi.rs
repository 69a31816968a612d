//! Money Flow Index (MFI): a volume-weighted RSI analogue.
//!
//! typical = (high + low + close) / 3; raw flow = typical * volume.
//! Flow counts as positive when typical rises, negative when it falls.
//! MFI = 100 - 100 / (1 + sum(positive, n) / sum(negative, n)).
//! Lookback: period. Zero-denominator policy matches RSI.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::rsi::strength_index;
use crate::indicators::window::{diff, rolling_sum};

#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
    name: String,
}

impl Mfi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MFI period must be >= 1");
        Self {
            period,
            name: format!("MFI_{period}"),
        }
    }
}

pub fn mfi_values(data: &PriceColumns, period: usize) -> Vec<f64> {
    let typical: Vec<f64> = data
        .high
        .iter()
        .zip(&data.low)
        .zip(&data.close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect();
    let delta = diff(&typical);

    let mut positive = vec![f64::NAN; typical.len()];
    let mut negative = vec![f64::NAN; typical.len()];
    for i in 0..typical.len() {
        let flow = typical[i] * data.volume[i];
        if delta[i].is_nan() || flow.is_nan() {
            continue;
        }
        positive[i] = if delta[i] > 0.0 { flow } else { 0.0 };
        negative[i] = if delta[i] < 0.0 { flow } else { 0.0 };
    }

    let pos_sum = rolling_sum(&positive, period);
    let neg_sum = rolling_sum(&negative, period);
    pos_sum
        .iter()
        .zip(&neg_sum)
        .map(|(&p, &n)| strength_index(p, n))
        .collect()
}

impl Indicator for Mfi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
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
        mfi_values(data, self.period)
    }
}
