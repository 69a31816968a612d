//! Aroon: measures time since highest high and lowest low as a percentage.
//!
//! Aroon Up = 100 * (period - bars_since_highest_high) / period
//! Aroon Down = 100 * (period - bars_since_lowest_low) / period
//! The window spans period + 1 bars; ties resolve to the most recent extreme.
//! Two lines (separate Indicator instances).
//! Lookback: period.

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;

/// Which line of the Aroon oscillator to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AroonBand {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct AroonLines {
    pub up: Vec<f64>,
    pub down: Vec<f64>,
}

/// Aroon line over one input column. `prefer(candidate, best)` decides
/// whether `candidate` replaces the current extreme.
fn aroon_line(values: &[f64], period: usize, prefer: fn(f64, f64) -> bool) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n <= period {
        return result;
    }

    for i in period..n {
        let window = &values[i - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }

        let mut best = window[0];
        let mut best_offset = 0;
        for (j, &v) in window.iter().enumerate().skip(1) {
            if prefer(v, best) {
                best = v;
                best_offset = j;
            }
        }
        let bars_since = period - best_offset;
        result[i] = 100.0 * (period - bars_since) as f64 / period as f64;
    }

    result
}

pub fn aroon_lines(high: &[f64], low: &[f64], period: usize) -> AroonLines {
    AroonLines {
        up: aroon_line(high, period, |v, best| v >= best),
        down: aroon_line(low, period, |v, best| v <= best),
    }
}

#[derive(Debug, Clone)]
pub struct Aroon {
    period: usize,
    band: AroonBand,
    name: String,
}

impl Aroon {
    pub fn up(period: usize) -> Self {
        assert!(period >= 1, "Aroon period must be >= 1");
        Self {
            period,
            band: AroonBand::Up,
            name: format!("Aroon_Up_{period}"),
        }
    }

    pub fn down(period: usize) -> Self {
        assert!(period >= 1, "Aroon period must be >= 1");
        Self {
            period,
            band: AroonBand::Down,
            name: format!("Aroon_Down_{period}"),
        }
    }
}

impl Indicator for Aroon {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn inputs(&self) -> &'static [PriceField] {
        match self.band {
            AroonBand::Up => &[PriceField::High],
            AroonBand::Down => &[PriceField::Low],
        }
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        match self.band {
            AroonBand::Up => aroon_line(&data.high, self.period, |v, best| v >= best),
            AroonBand::Down => aroon_line(&data.low, self.period, |v, best| v <= best),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_columns, DEFAULT_EPSILON};

    #[test]
    fn aroon_up_highest_at_end() {
        // Highs: 10, 11, 12, 13 (highest on the last bar) → 100
        let data = make_ohlc_columns(&[
            (9.0, 10.0, 8.0, 9.5),
            (9.5, 11.0, 9.0, 10.5),
            (10.5, 12.0, 10.0, 11.5),
            (11.5, 13.0, 11.0, 12.5),
        ]);
        let result = Aroon::up(3).compute(&data);
        assert!(result[2].is_nan());
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn aroon_up_highest_at_start() {
        // Highs: 20, 11, 12, 13 (highest 3 bars ago) → 0
        let data = make_ohlc_columns(&[
            (19.0, 20.0, 18.0, 19.5),
            (9.5, 11.0, 9.0, 10.5),
            (10.5, 12.0, 10.0, 11.5),
            (11.5, 13.0, 11.0, 12.5),
        ]);
        let result = Aroon::up(3).compute(&data);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn aroon_tie_prefers_most_recent() {
        // Highs: 15, 12, 15, 11 → most recent 15 is 1 bar ago → 100 * 2/3
        let high = [15.0, 12.0, 15.0, 11.0];
        let low = [1.0, 1.0, 1.0, 1.0];
        let lines = aroon_lines(&high, &low, 3);
        assert_approx(lines.up[3], 200.0 / 3.0, DEFAULT_EPSILON);
        // Constant lows: the latest bar is the most recent low → 100
        assert_approx(lines.down[3], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn aroon_down_lowest_at_end() {
        let data = make_ohlc_columns(&[
            (9.0, 10.0, 8.0, 9.5),
            (9.5, 11.0, 7.0, 10.5),
            (10.5, 12.0, 6.0, 11.5),
            (11.5, 13.0, 5.0, 12.5),
        ]);
        let result = Aroon::down(3).compute(&data);
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn aroon_bounds() {
        let data = make_ohlc_columns(&[
            (10.0, 15.0, 5.0, 12.0),
            (12.0, 14.0, 8.0, 10.0),
            (10.0, 16.0, 7.0, 13.0),
            (13.0, 13.5, 9.0, 11.0),
            (11.0, 17.0, 6.0, 14.0),
        ]);
        let lines = aroon_lines(&data.high, &data.low, 3);
        for i in 3..5 {
            assert!((0.0..=100.0).contains(&lines.up[i]));
            assert!((0.0..=100.0).contains(&lines.down[i]));
        }
    }

    #[test]
    fn aroon_nan_propagation() {
        let mut data = make_ohlc_columns(&[
            (10.0, 15.0, 5.0, 12.0),
            (12.0, 14.0, 8.0, 10.0),
            (10.0, 16.0, 7.0, 13.0),
        ]);
        data.high[1] = f64::NAN;
        let result = Aroon::up(2).compute(&data);
        assert!(result[2].is_nan());
    }

    #[test]
    fn aroon_lookback_and_names() {
        assert_eq!(Aroon::up(25).lookback(), 25);
        assert_eq!(Aroon::up(14).name(), "Aroon_Up_14");
        assert_eq!(Aroon::down(14).name(), "Aroon_Down_14");
    }
}
