//! Rolling-window building blocks shared by the primitives.
//!
//! Every function returns a series of the input's length. A window yields NaN
//! until `period` values are available, and whenever any value inside it is
//! NaN. Windows are re-summed from scratch in positional order so results do
//! not drift with series length.

/// Apply `f` to every complete, NaN-free trailing window of `period` values.
pub fn rolling_apply<F>(values: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = f(window);
    }

    result
}

pub fn rolling_sum(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |w| w.iter().sum())
}

pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |w| w.iter().sum::<f64>() / period as f64)
}

pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

pub fn rolling_min(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Rolling sample standard deviation (divisor `period - 1`).
///
/// A single-value window has no sample deviation, so `period < 2` yields all NaN.
pub fn rolling_sample_std(values: &[f64], period: usize) -> Vec<f64> {
    if period < 2 {
        return vec![f64::NAN; values.len()];
    }
    rolling_apply(values, period, |w| {
        let mean = w.iter().sum::<f64>() / period as f64;
        let sum_sq: f64 = w
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum();
        (sum_sq / (period - 1) as f64).sqrt()
    })
}

/// First difference: `out[i] = values[i] - values[i-1]`, NaN at position 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        result[i] = values[i] - values[i - 1];
    }
    result
}
