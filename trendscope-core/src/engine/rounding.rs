//! Output precision: 4 decimals, half away from zero.
//!
//! Rounding happens once per column at the engine boundary, never inside
//! primitives. Non-finite values are the missing marker.

const SCALE: f64 = 1e4;

/// Round to 4 decimals. NaN and ±inf become NaN; -0.0 becomes 0.0.
pub fn round4(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let scaled = x * SCALE;
    if !scaled.is_finite() {
        return x;
    }
    let r = scaled.round() / SCALE;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

pub fn round_series(values: &[f64]) -> Vec<f64> {
    values.iter().copied().map(round4).collect()
}

/// Engine-side NaN to boundary-side `None`.
pub fn to_option(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}
