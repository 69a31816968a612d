//! Simple Moving Average (SMA).
//!
//! Rolling mean over a lookback window. Applied to closes (`SMA_{n}`) and to
//! volume (`Vol_Avg_{n}`).
//! Lookback: period - 1 (first valid value at index period-1).

use crate::domain::{PriceColumns, PriceField};
use crate::indicator::Indicator;
use crate::indicators::window::rolling_mean;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    source: PriceField,
    name: String,
}

impl Sma {
    /// SMA of closes, named `SMA_{period}`.
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            source: PriceField::Close,
            name: format!("SMA_{period}"),
        }
    }

    /// Volume average, named `Vol_Avg_{period}`.
    pub fn volume(period: usize) -> Self {
        assert!(period >= 1, "volume average period must be >= 1");
        Self {
            period,
            source: PriceField::Volume,
            name: format!("Vol_Avg_{period}"),
        }
    }
}

/// SMA of an arbitrary series.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(values, period)
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn inputs(&self) -> &'static [PriceField] {
        match self.source {
            PriceField::Volume => &[PriceField::Volume],
            _ => &[PriceField::Close],
        }
    }

    fn compute(&self, data: &PriceColumns) -> Vec<f64> {
        sma_of_series(data.field(self.source), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_columns, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let data = make_columns(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = Sma::new(5).compute(&data);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().enumerate().take(4) {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_3_on_one_to_five() {
        let data = make_columns(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = Sma::new(3).compute(&data);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 2.0, DEFAULT_EPSILON);
        assert_approx(result[3], 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_close() {
        let data = make_columns(&[100.0, 200.0, 300.0]);
        let result = Sma::new(1).compute(&data);
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sma_nan_propagation() {
        let mut data = make_columns(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        data.close[2] = f64::NAN;
        let result = Sma::new(3).compute(&data);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn volume_average_reads_volume() {
        let mut data = make_columns(&[1.0, 1.0, 1.0]);
        data.volume = vec![100.0, 200.0, 600.0];
        let sma = Sma::volume(3);
        assert_eq!(sma.name(), "Vol_Avg_3");
        assert_eq!(sma.inputs(), &[PriceField::Volume]);
        assert_approx(sma.compute(&data)[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_lookback_and_name() {
        assert_eq!(Sma::new(20).lookback(), 19);
        assert_eq!(Sma::new(1).lookback(), 0);
        assert_eq!(Sma::new(20).name(), "SMA_20");
    }

    #[test]
    fn sma_too_few_bars() {
        let data = make_columns(&[10.0, 11.0]);
        assert!(Sma::new(5).compute(&data).iter().all(|v| v.is_nan()));
    }
}
