//! Rounding, sign and ordering helpers that the rest of the real kernel is built on.

use super::power::int_pow;

/// Returns the absolute value.
pub fn abs(x: f64) -> f64 {
    if x < 0.0 { -x } else { x }
}

/// Returns `1`, `-1` or `0` according to the sign of `x`. `NaN` is passed through.
pub fn sgn(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Rounds towards negative infinity.
///
/// Non-finite inputs produce `NaN`, except that values beyond the range where doubles carry a
/// fractional part are returned unchanged.
pub fn floor(x: f64) -> f64 {
    if (0.0..1.0).contains(&x) {
        0.0
    } else {
        x - ((x % 1.0) + 1.0) % 1.0
    }
}

/// Rounds towards positive infinity.
pub fn ceil(x: f64) -> f64 {
    if is_integer(x) { x } else { floor(x) + 1.0 }
}

/// Returns true if `x` is a finite integer.
pub fn is_integer(x: f64) -> bool {
    floor(x) == x
}

/// Rounds `x` half-up.
///
/// When `|x| >= 1`, `n` is a number of significant digits; when `|x| < 1`, it is a number of
/// decimal places. Infinities and `NaN` are returned unchanged.
pub fn round(x: f64, n: i32) -> f64 {
    if x.is_nan() || x.is_infinite() {
        return x;
    }

    let magnitude = abs(x);
    let accuracy = if magnitude >= 1.0 {
        let mut digits = 1;
        let mut scaled = magnitude / 10.0;
        while scaled >= 1.0 {
            digits += 1;
            scaled /= 10.0;
        }
        int_pow(10.0, (n - digits) as i64)
    } else {
        int_pow(10.0, n as i64)
    };

    let shifted = x * accuracy;
    let base = floor(shifted);
    if shifted - base >= 0.5 {
        (base + 1.0) / accuracy
    } else {
        base / accuracy
    }
}

/// Returns the largest of the values, or `NaN` if there are none.
pub fn max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .reduce(|a, b| if a > b { a } else { b })
        .unwrap_or(f64::NAN)
}

/// Returns the smallest of the values, or `NaN` if there are none.
pub fn min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .reduce(|a, b| if a < b { a } else { b })
        .unwrap_or(f64::NAN)
}
