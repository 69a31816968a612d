//! ADX/DMI: Average Directional Index with Directional Movement lines.
//!
//! Steps:
//! 1. up = high[t] - high[t-1], down = low[t-1] - low[t]
//!    +DM = up if up > down and up > 0, else 0; -DM symmetric; both 0 at t = 0
//! 2. +DI = 100 * SMA(+DM, n) / ATR(n); -DI = 100 * SMA(-DM, n) / ATR(n)
//! 3. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 4. ADX = SMA(DX, n)
//!
//! DI is missing where ATR is 0; DX is missing where +DI + -DI is 0.
//! Lookback: n-1 for the DI lines, 2n-2 for ADX.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::atr::atr_values;
use crate::indicators::window::rolling_mean;

/// Which line of the directional movement system to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmiLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct DmiLines {
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub dx: Vec<f64>,
    pub adx: Vec<f64>,
}

/// Raw +DM / -DM series.
pub fn directional_movement(high: &[f64], low: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = high.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    for i in 1..n {
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];

        if up.is_nan() || down.is_nan() {
            plus_dm[i] = f64::NAN;
            minus_dm[i] = f64::NAN;
            continue;
        }
        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
    }

    (plus_dm, minus_dm)
}

pub fn dmi_lines(data: &PriceColumns, period: usize) -> DmiLines {
    let (plus_dm, minus_dm) = directional_movement(&data.high, &data.low);
    let atr = atr_values(data, period);
    let smooth_plus = rolling_mean(&plus_dm, period);
    let smooth_minus = rolling_mean(&minus_dm, period);

    let scale = |dm: &[f64]| -> Vec<f64> {
        dm.iter()
            .zip(&atr)
            .map(|(&d, &a)| {
                if a.is_nan() || d.is_nan() || a == 0.0 {
                    f64::NAN
                } else {
                    100.0 * d / a
                }
            })
            .collect()
    };
    let plus_di = scale(&smooth_plus);
    let minus_di = scale(&smooth_minus);

    let dx: Vec<f64> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(&p, &m)| {
            let sum = p + m;
            if sum.is_nan() || sum == 0.0 {
                f64::NAN
            } else {
                100.0 * (p - m).abs() / sum
            }
        })
        .collect();
    let adx = rolling_mean(&dx, period);

    DmiLines {
        plus_di,
        minus_di,
        dx,
        adx,
    }
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    line: DmiLine,
    name: String,
}

impl Adx {
    pub fn new(period: usize, line: DmiLine) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        let name = match line {
            DmiLine::Adx => format!("ADX_{period}"),
            DmiLine::PlusDi => format!("DI_Plus_{period}"),
            DmiLine::MinusDi => format!("DI_Minus_{period}"),
        };
        Self { period, line, name }
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            DmiLine::Adx => 2 * (self.period - 1),
            DmiLine::PlusDi | DmiLine::MinusDi => self.period - 1,
        }
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::High, PriceField::Low, PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        let lines = dmi_lines(data, self.period);
        match self.line {
            DmiLine::Adx => lines.adx,
            DmiLine::PlusDi => lines.plus_di,
            DmiLine::MinusDi => lines.minus_di,
        }
    }
}
