//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Clamp a backend score into `[0, 100]`, returning 0.0 for non-finite values.
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Round a score to a whole percentage for meters and `aria-valuenow`.
#[must_use]
pub fn score_percent(value: f64) -> u8 {
    cast::<f64, u8>(clamp_score(value).round()).unwrap_or(0)
}

/// Convert a millisecond delay into the `i32` the browser timer API expects.
#[must_use]
pub fn timer_ms(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Convert an `f64` epoch timestamp (as returned by `Date.now()`) to `i64`.
#[must_use]
pub fn epoch_ms(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    cast::<f64, i64>(value.trunc()).unwrap_or(0)
}
