use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};

use crate::engine::errors::NumericError;

/// Largest scale magnitude a decimal may carry, positive or negative.
pub const MAX_SCALE: i32 = i16::MAX as i32;

/// Arbitrary-precision fixed-point number: `unscaled * 10^-scale`.
///
/// Equality is structural, so `1.0` and `1.00` are different values; use
/// [`Decimal::numeric_cmp`] to compare magnitudes. The scale always lies
/// within `-MAX_SCALE..=MAX_SCALE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DecimalParts", into = "DecimalParts")]
pub struct Decimal(BigDecimal);

/// Serialized shape of a [`Decimal`]; the scale is checked on the way in.
#[derive(Serialize, Deserialize)]
struct DecimalParts {
    unscaled: BigInt,
    scale: i32,
}

impl TryFrom<DecimalParts> for Decimal {
    type Error = NumericError;

    fn try_from(parts: DecimalParts) -> Result<Self, Self::Error> {
        Decimal::new(parts.unscaled, parts.scale)
    }
}

impl From<Decimal> for DecimalParts {
    fn from(value: Decimal) -> Self {
        let (unscaled, scale) = value.0.into_bigint_and_scale();
        DecimalParts {
            unscaled,
            scale: scale as i32,
        }
    }
}

fn check_scale(scale: i64) -> Result<i64, NumericError> {
    if scale.abs() > MAX_SCALE as i64 {
        return Err(NumericError::ScaleOutOfRange);
    }
    Ok(scale)
}

impl Decimal {
    pub fn new(unscaled: BigInt, scale: i32) -> Result<Self, NumericError> {
        let scale = check_scale(scale as i64)?;
        Ok(Self(BigDecimal::new(unscaled, scale)))
    }

    /// Zero at `scale`, clamped to the representable range.
    pub fn zero(scale: i32) -> Self {
        Self(BigDecimal::new(
            BigInt::zero(),
            scale.clamp(-MAX_SCALE, MAX_SCALE) as i64,
        ))
    }

    pub fn unscaled(&self) -> Cow<'_, BigInt> {
        self.0.as_bigint_and_scale().0
    }

    pub fn scale(&self) -> i32 {
        self.0.fractional_digit_count() as i32
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Decimal digits of the unscaled magnitude; zero has one digit.
    pub fn digits(&self) -> u32 {
        if self.is_zero() {
            return 1;
        }
        self.0.digits() as u32
    }

    /// Significant digits as counted against a declared precision.
    /// A negative scale contributes its implied trailing zeros.
    pub fn precision(&self) -> u32 {
        if self.is_zero() {
            return 1;
        }
        let scale = self.scale();
        if scale < 0 {
            self.digits() + scale.unsigned_abs()
        } else {
            self.digits()
        }
    }

    fn round_half_up(&self, scale: i64) -> Decimal {
        Decimal(self.0.with_scale_round(scale, RoundingMode::HalfUp))
    }

    /// Rescale to `new_scale`, rounding half-up when digits are dropped.
    pub fn rescale(&self, new_scale: i32) -> Result<Decimal, NumericError> {
        let new_scale = check_scale(new_scale as i64)?;
        Ok(self.round_half_up(new_scale))
    }

    pub fn add(&self, other: &Decimal) -> Decimal {
        Decimal(self.0.clone() + other.0.clone())
    }

    pub fn sub(&self, other: &Decimal) -> Decimal {
        Decimal(self.0.clone() + (-other.0.clone()))
    }

    /// Exact product; the result scale is the sum of both scales.
    pub fn mul(&self, other: &Decimal) -> Result<Decimal, NumericError> {
        let scale =
            check_scale(self.0.fractional_digit_count() + other.0.fractional_digit_count())?;
        let (left, right) = (self.unscaled(), other.unscaled());
        Ok(Decimal(BigDecimal::new(&*left * &*right, scale)))
    }

    /// Quotient rounded half-up at `scale` fractional digits.
    pub fn div_to_scale(&self, divisor: &Decimal, scale: i32) -> Result<Decimal, NumericError> {
        if divisor.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let scale = check_scale(scale as i64)?;
        // Truncate one digit past the target; half-up on that digit is exact.
        let guard = scale + 1;
        let shift = guard + divisor.0.fractional_digit_count() - self.0.fractional_digit_count();
        let mut dividend = self.unscaled().into_owned();
        let mut divisor = divisor.unscaled().into_owned();
        if shift >= 0 {
            dividend *= ten_pow(shift);
        } else {
            divisor *= ten_pow(-shift);
        }
        let truncated = BigDecimal::new(dividend / divisor, guard);
        Ok(Decimal(truncated.with_scale_round(scale, RoundingMode::HalfUp)))
    }

    /// Drop fractional digits until at most `max_digits` remain, never
    /// going below scale 0. Integer digits are left untouched.
    pub fn round_to_precision(&self, max_digits: u32) -> Decimal {
        let mut current = self.clone();
        while current.scale() > 0 && current.precision() > max_digits {
            let excess = (current.precision() - max_digits) as i64;
            let target = (current.scale() as i64 - excess).max(0);
            current = current.round_half_up(target);
        }
        current
    }

    /// Remove trailing fractional zeros, stopping at scale 0.
    pub fn trim_fraction_zeros(&self) -> Decimal {
        if self.scale() <= 0 {
            return self.clone();
        }
        let target = self.0.normalized().fractional_digit_count().max(0);
        Decimal(self.0.with_scale(target))
    }

    pub fn numeric_cmp(&self, other: &Decimal) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.round_half_up(0).unscaled().to_i64()
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Exact decimal of the shortest text that round-trips `value`.
    pub fn from_f64(value: f64) -> Result<Decimal, NumericError> {
        if !value.is_finite() {
            return Err(NumericError::NotRepresentable(value.to_string()));
        }
        value.to_string().parse()
    }
}

fn ten_pow(exp: i64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.scale() == other.scale() && self.unscaled() == other.unscaled()
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unscaled().hash(state);
        self.scale().hash(state);
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(BigDecimal::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal(BigDecimal::from(value))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(BigDecimal::from(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() && self.scale() <= 0 {
            return f.write_str("0");
        }
        f.write_str(&self.0.to_plain_string())
    }
}
