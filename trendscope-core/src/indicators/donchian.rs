//! Donchian Channel: highest high / lowest low over a lookback window.
//!
//! Three series (exposed as separate Indicator instances):
//! - Upper: max(high[t-period+1..=t])
//! - Lower: min(low[t-period+1..=t])
//! - Middle: (upper + lower) / 2
//!
//! Lookback: period - 1.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::{rolling_max, rolling_min};

/// Which line of the Donchian channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonchianBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct DonchianLines {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn donchian_channel(high: &[f64], low: &[f64], period: usize) -> DonchianLines {
    let upper = rolling_max(high, period);
    let lower = rolling_min(low, period);
    let middle = upper
        .iter()
        .zip(&lower)
        .map(|(u, l)| (u + l) / 2.0)
        .collect();
    DonchianLines {
        upper,
        middle,
        lower,
    }
}

#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
    band: DonchianBand,
    name: String,
}

impl Donchian {
    pub fn new(period: usize, band: DonchianBand) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        let label = match band {
            DonchianBand::Upper => "Upper",
            DonchianBand::Middle => "Middle",
            DonchianBand::Lower => "Lower",
        };
        Self {
            period,
            band,
            name: format!("Donchian_{label}_{period}"),
        }
    }

    pub fn upper(period: usize) -> Self {
        Self::new(period, DonchianBand::Upper)
    }

    pub fn middle(period: usize) -> Self {
        Self::new(period, DonchianBand::Middle)
    }

    pub fn lower(period: usize) -> Self {
        Self::new(period, DonchianBand::Lower)
    }
}

impl Indicator for Donchian {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::High, PriceField::Low]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        match self.band {
            DonchianBand::Upper => rolling_max(&data.high, self.period),
            DonchianBand::Lower => rolling_min(&data.low, self.period),
            DonchianBand::Middle => donchian_channel(&data.high, &data.low, self.period).middle,
        }
    }
}
