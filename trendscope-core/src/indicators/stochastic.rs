//! Stochastic Oscillator.
//!
//! %K = 100 * (close - lowest_low(k)) / (highest_high(k) - lowest_low(k))
//! %D = SMA(d) of %K; slow %D = SMA(slow) of %D.
//! %K is missing where the k-window range is zero.
//! Lookback: k-1 for %K, k+d-2 for %D, k+d+slow-3 for slow %D.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::{rolling_max, rolling_mean, rolling_min};

/// Which stochastic line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
    SlowD,
}

impl StochasticLine {
    pub fn column_name(self) -> &'static str {
        match self {
            StochasticLine::K => "Stoch_K",
            StochasticLine::D => "Stoch_D",
            StochasticLine::SlowD => "Stoch_SlowD",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StochasticLines {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub slow_d: Vec<f64>,
}

pub fn stochastic_lines(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    k_period: usize,
    d_period: usize,
    slow_period: usize,
) -> StochasticLines {
    let lowest = rolling_min(low, k_period);
    let highest = rolling_max(high, k_period);

    let k: Vec<f64> = close
        .iter()
        .zip(lowest.iter().zip(&highest))
        .map(|(&c, (&lo, &hi))| {
            let range = hi - lo;
            if range.is_nan() || c.is_nan() || range == 0.0 {
                f64::NAN
            } else {
                100.0 * (c - lo) / range
            }
        })
        .collect();
    let d = rolling_mean(&k, d_period);
    let slow_d = rolling_mean(&d, slow_period);

    StochasticLines { k, d, slow_d }
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    slow_period: usize,
    line: StochasticLine,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize, slow_period: usize, line: StochasticLine) -> Self {
        assert!(
            k_period >= 1 && d_period >= 1 && slow_period >= 1,
            "Stochastic periods must be >= 1"
        );
        Self {
            k_period,
            d_period,
            slow_period,
            line,
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        self.line.column_name()
    }

    fn lookback(&self) -> usize {
        let k = self.k_period - 1;
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => k + self.d_period - 1,
            StochasticLine::SlowD => k + self.d_period - 1 + self.slow_period - 1,
        }
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::High, PriceField::Low, PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        let lines = stochastic_lines(
            &data.high,
            &data.low,
            &data.close,
            self.k_period,
            self.d_period,
            self.slow_period,
        );
        match self.line {
            StochasticLine::K => lines.k,
            StochasticLine::D => lines.d,
            StochasticLine::SlowD => lines.slow_d,
        }
    }
}
