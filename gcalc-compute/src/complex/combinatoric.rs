//! Functions on complex numbers that only make sense for real or integral values.

use gcalc_error::Error;
use crate::error::RealNumbersOnly;
use crate::real;
use super::Complex;

/// Gaussian integers whose norm exceeds this are not factored; their [`gcd`] degrades to `1`.
const GAUSSIAN_NORM_LIMIT: i64 = 1_000_000_000_000;

/// The largest component a Gaussian integer may have before it is converted to integers, the
/// square root of [`GAUSSIAN_NORM_LIMIT`].
const GAUSSIAN_COMPONENT_LIMIT: f64 = 1_000_000.0;

/// Returns the real part of `c`, failing if its imaginary part is nonzero to 12 decimal places.
fn real_only(c: Complex) -> Result<f64, Error> {
    if real::round(c.im, 12) != 0.0 {
        Err(Error::spanless(RealNumbersOnly))
    } else {
        Ok(c.re)
    }
}

/// Returns the largest of the values, which must all be real.
pub fn max(values: &[Complex]) -> Result<Complex, Error> {
    let reals = values.iter().map(|&c| real_only(c)).collect::<Result<Vec<_>, _>>()?;
    Ok(Complex::real(real::max(&reals)))
}

/// Returns the smallest of the values, which must all be real.
pub fn min(values: &[Complex]) -> Result<Complex, Error> {
    let reals = values.iter().map(|&c| real_only(c)).collect::<Result<Vec<_>, _>>()?;
    Ok(Complex::real(real::min(&reals)))
}

/// Returns `c!`.
pub fn fac(c: Complex) -> Result<Complex, Error> {
    Ok(Complex::real(real::fac(real_only(c.round(12))?)?))
}

/// Returns the number of permutations of `r` items out of `n`.
pub fn npr(n: Complex, r: Complex) -> Result<Complex, Error> {
    Ok(Complex::real(real::npr(real_only(n)?, real_only(r)?)?))
}

/// Returns the number of combinations of `r` items out of `n`.
pub fn ncr(n: Complex, r: Complex) -> Result<Complex, Error> {
    Ok(Complex::real(real::ncr(real_only(n)?, real_only(r)?)?))
}

/// Rounds both parts towards negative infinity.
pub fn floor(c: Complex) -> Complex {
    Complex::new(real::floor(c.re), real::floor(c.im))
}

/// Rounds both parts towards positive infinity.
pub fn ceil(c: Complex) -> Complex {
    Complex::new(real::ceil(c.re), real::ceil(c.im))
}

/// A Gaussian integer with exact integer parts.
type Gaussian = (i64, i64);

/// Divides `a` by `b` if the quotient is a Gaussian integer.
fn divide_exact(a: Gaussian, b: Gaussian) -> Option<Gaussian> {
    let norm = b.0 * b.0 + b.1 * b.1;
    let re = a.0 * b.0 + a.1 * b.1;
    let im = a.1 * b.0 - a.0 * b.1;
    (re % norm == 0 && im % norm == 0).then_some((re / norm, im / norm))
}

/// Rotates a nonzero Gaussian integer by powers of `i` until it lies in the first quadrant
/// (positive real part, nonnegative imaginary part).
fn normalize(mut z: Gaussian) -> Gaussian {
    if z == (0, 0) {
        return z;
    }
    while !(z.0 > 0 && z.1 >= 0) {
        z = (-z.1, z.0);
    }
    z
}

/// Writes a prime `p = 1 (mod 4)` as a sum of two squares `x^2 + y^2`.
fn two_squares(p: i64) -> Option<(i64, i64)> {
    let mut x = 1;
    while x * x < p {
        let rest = p - x * x;
        let mut y = real::sqrt(rest as f64) as i64;
        while y * y > rest {
            y -= 1;
        }
        while (y + 1) * (y + 1) <= rest {
            y += 1;
        }
        if y * y == rest {
            return Some((x, y));
        }
        x += 1;
    }
    None
}

/// Returns the rational primes dividing `n`, by trial division.
fn prime_divisors(mut n: i64) -> Vec<i64> {
    let mut primes = Vec::new();
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            primes.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        primes.push(n);
    }
    primes
}

/// Factors a nonzero Gaussian integer into first-quadrant Gaussian primes, ignoring the unit.
/// Returns [`None`] if the norm is too large to factor by trial division.
fn gaussian_factors(z: Gaussian) -> Option<Vec<Gaussian>> {
    let norm = z.0.checked_mul(z.0)?.checked_add(z.1.checked_mul(z.1)?)?;
    if norm > GAUSSIAN_NORM_LIMIT {
        return None;
    }

    let mut rest = z;
    let mut factors = Vec::new();
    for p in prime_divisors(norm) {
        let candidates = if p == 2 {
            vec![(1, 1)]
        } else if p % 4 == 3 {
            vec![(p, 0)]
        } else {
            let (x, y) = two_squares(p)?;
            vec![(x, y), (y, x)]
        };

        for candidate in candidates {
            while let Some(quotient) = divide_exact(rest, candidate) {
                factors.push(candidate);
                rest = quotient;
            }
        }
    }
    Some(factors)
}

/// Returns the greatest common divisor of two Gaussian integers, normalized into the first
/// quadrant. Anything else gives `1`.
fn gaussian_gcd2(a: Complex, b: Complex) -> Complex {
    let in_range = |c: Complex| {
        c.is_gaussian_integer()
            && real::abs(c.re) <= GAUSSIAN_COMPONENT_LIMIT
            && real::abs(c.im) <= GAUSSIAN_COMPONENT_LIMIT
    };
    if !in_range(a) || !in_range(b) {
        return Complex::ONE;
    }

    let a = (a.re as i64, a.im as i64);
    let b = (b.re as i64, b.im as i64);
    if a == (0, 0) || b == (0, 0) {
        let (re, im) = normalize(if a == (0, 0) { b } else { a });
        return Complex::new(re as f64, im as f64);
    }

    let (Some(factors_a), Some(mut factors_b)) = (gaussian_factors(a), gaussian_factors(b)) else {
        return Complex::ONE;
    };

    let mut common = (1, 0);
    for factor in factors_a {
        if let Some(pos) = factors_b.iter().position(|&other| other == factor) {
            factors_b.swap_remove(pos);
            common = (
                common.0 * factor.0 - common.1 * factor.1,
                common.0 * factor.1 + common.1 * factor.0,
            );
        }
    }

    let (re, im) = normalize(common);
    Complex::new(re as f64, im as f64)
}

/// Returns the greatest common divisor of all the values.
///
/// Real values use Euclid's algorithm. Gaussian integers are factored by trial division and
/// their common prime factors multiplied together; inputs that are not Gaussian integers, or
/// whose norm is too large to factor, give `1`.
pub fn gcd(values: &[Complex]) -> Complex {
    if values.iter().all(Complex::is_real) {
        let reals = values.iter().map(|c| c.re).collect::<Vec<_>>();
        return Complex::real(real::gcd(&reals));
    }

    values
        .iter()
        .copied()
        .reduce(gaussian_gcd2)
        .unwrap_or(Complex::NAN)
}

#[cfg(test)]
mod tests {
    use gcalc_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn real_only_functions() {
        assert_eq!(max(&[Complex::real(1.0), Complex::real(4.0)]).unwrap(), Complex::real(4.0));
        let err = min(&[Complex::real(1.0), Complex::I]).unwrap_err();
        assert_eq!(err.category(), Category::Domain);
        assert_eq!(err.message(), "Real numbers only.");
        assert!(fac(Complex::new(3.0, 1.0)).is_err());
        assert_eq!(fac(Complex::real(4.0)).unwrap(), Complex::real(24.0));
        assert_eq!(ncr(Complex::real(6.0), Complex::real(3.0)).unwrap(), Complex::real(20.0));
    }

    #[test]
    fn negative_factorial() {
        let err = fac(Complex::real(-1.0)).unwrap_err();
        assert_eq!(err.category(), Category::Domain);
    }

    #[test]
    fn component_rounding() {
        assert_eq!(floor(Complex::new(1.5, -1.5)), Complex::new(1.0, -2.0));
        assert_eq!(ceil(Complex::new(1.5, -1.5)), Complex::new(2.0, -1.0));
    }

    #[test]
    fn real_gcd() {
        assert_eq!(gcd(&[Complex::real(12.0), Complex::real(18.0)]), Complex::real(6.0));
    }

    #[test]
    fn gaussian_gcd() {
        assert_eq!(gcd(&[Complex::real(2.0), Complex::new(1.0, 1.0)]), Complex::new(1.0, 1.0));
        assert_eq!(gcd(&[Complex::real(5.0), Complex::new(3.0, 4.0)]), Complex::new(2.0, 1.0));
        assert_eq!(gcd(&[Complex::new(0.0, 3.0), Complex::ZERO]), Complex::real(3.0));
        assert_eq!(gcd(&[Complex::new(4.0, 2.0), Complex::new(6.0, 3.0)]), Complex::new(2.0, 1.0));
    }

    #[test]
    fn gaussian_gcd_out_of_range() {
        assert_eq!(gcd(&[Complex::ZERO, Complex::new(-1e300, 1.0)]), Complex::ONE);
        assert_eq!(gcd(&[Complex::new(1e18, 1.0), Complex::new(2.0, 2.0)]), Complex::ONE);
        assert_eq!(gcd(&[Complex::new(f64::INFINITY, 1.0), Complex::I]), Complex::ONE);
        assert_eq!(gcd(&[Complex::ZERO, Complex::new(-3.0, 1.0)]), Complex::new(1.0, 3.0));
    }

    #[test]
    fn gaussian_gcd_fallback() {
        assert_eq!(gcd(&[Complex::new(0.5, 1.0), Complex::real(2.0)]), Complex::ONE);
        assert_eq!(gcd(&[Complex::new(3e6, 1.0), Complex::new(0.0, 1.0)]), Complex::ONE);
    }
}
