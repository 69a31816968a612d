//! MACD: Moving Average Convergence Divergence.
//!
//! MACD = EMA(fast) - EMA(slow); Signal = EMA(signal) of MACD; Hist = MACD - Signal.
//! Three lines (separate Indicator instances), all defined from position 0.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::ema::ema_of_series;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

impl MacdLine {
    pub fn column_name(self) -> &'static str {
        match self {
            MacdLine::Macd => "MACD",
            MacdLine::Signal => "MACD_Signal",
            MacdLine::Histogram => "MACD_Hist",
        }
    }
}

/// All three MACD series.
#[derive(Debug, Clone)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd_lines(close: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let ema_fast = ema_of_series(close, fast);
    let ema_slow = ema_of_series(close, slow);
    let macd: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal = ema_of_series(&macd, signal);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
    MacdLines {
        macd,
        signal,
        histogram,
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        Self {
            fast,
            slow,
            signal,
            line,
        }
    }

    /// The conventional 12/26/9 configuration.
    pub fn standard(line: MacdLine) -> Self {
        Self::new(12, 26, 9, line)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        self.line.column_name()
    }

    fn lookback(&self) -> usize {
        0
    }

    fn inputs(&self) -> &'static [PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        let lines = macd_lines(&data.close, self.fast, self.slow, self.signal);
        match self.line {
            MacdLine::Macd => lines.macd,
            MacdLine::Signal => lines.signal,
            MacdLine::Histogram => lines.histogram,
        }
    }
}
