//! Logistic transform with fixed-precision decimal rounding.
//!
//! The probability is `e / (1 + e)` with `e = exp(eta)`. The quotient is
//! evaluated exactly on integers and rounded half-up to [`PRECISION`]
//! fractional digits, so results are identical on every platform.

use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};

/// Fractional digits kept in a probability.
pub const PRECISION: u32 = 8;

const SCALE: f64 = 1e8;

/// Decimal value of the shortest text that round-trips `value`.
///
/// This is not the exact binary expansion: `0.1` becomes exactly `0.1`.
pub(crate) fn decimal(value: f64) -> BigDecimal {
    BigDecimal::from_str(&value.to_string()).unwrap_or_else(|_| BigDecimal::zero())
}

/// Nearest `f64` to a decimal.
pub(crate) fn to_f64(value: &BigDecimal) -> f64 {
    // Parsing the decimal text gives a correctly rounded conversion.
    value.to_string().parse().unwrap_or(f64::NAN)
}

/// Probability for a linear predictor.
#[must_use]
pub fn probability(eta: &BigDecimal) -> f64 {
    let exponent = to_f64(eta).exp();
    if exponent.is_infinite() {
        return 1.0;
    }
    rounded_ratio(&decimal(exponent))
}

/// `e / (1 + e)` rounded half-up to [`PRECISION`] places, for `e >= 0`.
fn rounded_ratio(e: &BigDecimal) -> f64 {
    let (mut mantissa, exponent) = e.as_bigint_and_exponent();
    let ten = BigInt::from(10u8);

    // e = mantissa / unit
    let unit = if exponent >= 0 {
        ten.pow(exponent as u32)
    } else {
        mantissa *= ten.pow(exponent.unsigned_abs() as u32);
        BigInt::from(1u8)
    };

    let numerator = &mantissa * ten.pow(PRECISION);
    let denominator = unit + mantissa;

    // floor(n / d + 1/2) == floor((2n + d) / 2d) for non-negative n, d.
    let two = BigInt::from(2u8);
    let quotient = (&two * numerator + &denominator) / (two * denominator);

    quotient.to_f64().unwrap_or(f64::NAN) / SCALE
}
