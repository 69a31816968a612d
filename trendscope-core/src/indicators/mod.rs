//! Concrete indicator implementations.
//!
//! Every family is available twice: as a slice-level function returning raw
//! series (NaN = missing), and as named `Indicator` instances whose names are
//! the output column names profiles publish.
//!
//! Multi-line families (MACD, Stochastic, Bollinger, Donchian, ADX/DMI, Aroon)
//! are exposed as separate named instances per line, keeping the
//! single-series `Indicator` trait unchanged.

pub mod adx;
pub mod aroon;
pub mod atr;
pub mod bollinger;
pub mod cmf;
pub mod donchian;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod window;

pub use adx::{dmi_lines, Adx, DmiLine, DmiLines};
pub use aroon::{aroon_lines, Aroon, AroonBand, AroonLines};
pub use atr::{atr_values, true_range, Atr};
pub use bollinger::{bollinger_bands, Bollinger, BollingerBand, BollingerLines};
pub use cmf::{cmf_values, Cmf};
pub use donchian::{donchian_channel, Donchian, DonchianBand, DonchianLines};
pub use ema::{ema_of_series, Ema};
pub use macd::{macd_lines, Macd, MacdLine, MacdLines};
pub use mfi::{mfi_values, Mfi};
pub use obv::{obv_values, Obv};
pub use rsi::{rsi_of_series, Rsi};
pub use sma::{sma_of_series, Sma};
pub use stochastic::{stochastic_lines, Stochastic, StochasticLine, StochasticLines};

/// Create synthetic columns from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_columns(closes: &[f64]) -> crate::domain::PriceColumns {
    let rows: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_columns(&rows)
}

/// Create columns from explicit (open, high, low, close) rows, volume = 1000.
#[cfg(test)]
pub fn make_ohlc_columns(rows: &[(f64, f64, f64, f64)]) -> crate::domain::PriceColumns {
    crate::domain::PriceColumns {
        open: rows.iter().map(|r| r.0).collect(),
        high: rows.iter().map(|r| r.1).collect(),
        low: rows.iter().map(|r| r.2).collect(),
        close: rows.iter().map(|r| r.3).collect(),
        volume: vec![1000.0; rows.len()],
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
