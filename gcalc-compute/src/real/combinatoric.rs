//! Factorials, permutations, combinations and the greatest common divisor.

use gcalc_error::Error;
use crate::error::{NonnegativeIntegersOnly, PermutationOrder};
use super::miscellaneous::{abs, is_integer, round};

/// Factorials of arguments beyond this overflow to infinity.
const MAX_FACTORIAL: f64 = 170.0;

/// Rounds away floating-point noise and checks that the result is a nonnegative integer.
fn nonnegative_integer(n: f64) -> Result<f64, Error> {
    let n = round(n, 15);
    if n < 0.0 || !is_integer(n) {
        Err(Error::spanless(NonnegativeIntegersOnly))
    } else {
        Ok(n)
    }
}

/// Returns `n!`.
pub fn fac(n: f64) -> Result<f64, Error> {
    let n = nonnegative_integer(n)?;
    if n > MAX_FACTORIAL {
        return Ok(f64::INFINITY);
    }

    let mut product = 1.0;
    let mut i = 2.0;
    while i <= n {
        product *= i;
        i += 1.0;
    }
    Ok(product)
}

/// Returns the number of ordered selections of `r` items out of `n`, `n! / (n - r)!`.
pub fn npr(n: f64, r: f64) -> Result<f64, Error> {
    let n = nonnegative_integer(n)?;
    let r = nonnegative_integer(r)?;
    if r > n {
        return Err(Error::spanless(PermutationOrder));
    }

    let mut product: f64 = 1.0;
    let mut i = n - r + 1.0;
    while i <= n && product.is_finite() {
        product *= i;
        i += 1.0;
    }
    Ok(product)
}

/// Returns the number of unordered selections of `r` items out of `n`.
pub fn ncr(n: f64, r: f64) -> Result<f64, Error> {
    let n = nonnegative_integer(n)?;
    let r = nonnegative_integer(r)?;
    if r > n {
        return Err(Error::spanless(PermutationOrder));
    }

    // choose the smaller side so the intermediate values stay small
    let k = if r > n - r { n - r } else { r };
    Ok(npr(n, k)? / fac(k)?)
}

/// Returns the greatest common divisor of two integers by Euclid's algorithm. Non-integer
/// arguments give `1`.
pub fn gcd2(a: f64, b: f64) -> f64 {
    if !is_integer(a) || !is_integer(b) {
        return 1.0;
    }

    let (mut a, mut b) = (abs(a), abs(b));
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns the greatest common divisor of all the values.
pub fn gcd(values: &[f64]) -> f64 {
    match values {
        [] => f64::NAN,
        [single] => if is_integer(*single) { abs(*single) } else { 1.0 },
        [first, rest @ ..] => rest.iter().fold(*first, |acc, &value| gcd2(acc, value)),
    }
}
