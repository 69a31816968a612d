//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses the rolling sample stddev (divide by N-1).
//! Lookback: period - 1.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::{rolling_mean, rolling_sample_std};

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

impl BollingerBand {
    pub fn column_name(self) -> &'static str {
        match self {
            BollingerBand::Upper => "BB_Upper",
            BollingerBand::Middle => "BB_Middle",
            BollingerBand::Lower => "BB_Lower",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BollingerLines {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger_bands(close: &[f64], period: usize, multiplier: f64) -> BollingerLines {
    let middle = rolling_mean(close, period);
    let stddev = rolling_sample_std(close, period);
    let upper = middle
        .iter()
        .zip(&stddev)
        .map(|(m, s)| m + multiplier * s)
        .collect();
    let lower = middle
        .iter()
        .zip(&stddev)
        .map(|(m, s)| m - multiplier * s)
        .collect();
    BollingerLines {
        upper,
        middle,
        lower,
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self {
            period,
            multiplier,
            band,
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Lower)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        self.band.column_name()
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        let lines = bollinger_bands(&data.close, self.period, self.multiplier);
        match self.band {
            BollingerBand::Upper => lines.upper,
            BollingerBand::Middle => lines.middle,
            BollingerBand::Lower => lines.lower,
        }
    }
}
