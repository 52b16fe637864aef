//! Exact fixed-point decimal
//!
//! An arbitrary-precision signed integer plus a non-negative scale
//! (`value = unscaled / 10^scale`). Equality and ordering are numeric, so
//! `12.30 == 12.3`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{CodecError, Result};

/// Arbitrary-precision signed fixed-point decimal
#[derive(Debug, Clone)]
pub struct Decimal {
    unscaled: BigInt,
    scale: u32,
}

impl Decimal {
    /// Create a decimal equal to `unscaled / 10^scale`
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// The unscaled integer
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Digits to the right of the decimal point
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }

    /// Number of decimal digits in the unscaled magnitude (zero has one)
    pub fn precision(&self) -> usize {
        self.unscaled.magnitude().to_str_radix(10).len()
    }

    /// Rescale without losing digits
    ///
    /// Returns `None` when lowering the scale would drop non-zero digits.
    pub fn with_scale(&self, scale: u32) -> Option<Decimal> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Some(self.clone()),
            Ordering::Greater => {
                let factor = pow10(scale - self.scale);
                Some(Decimal::new(&self.unscaled * factor, scale))
            }
            Ordering::Less => {
                let factor = pow10(self.scale - scale);
                let (quotient, remainder) = (
                    &self.unscaled / &factor,
                    &self.unscaled % &factor,
                );
                if remainder.is_zero() {
                    Some(Decimal::new(quotient, scale))
                } else {
                    None
                }
            }
        }
    }

    /// Drop trailing fractional zeros
    pub fn normalized(&self) -> Decimal {
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        let ten = BigInt::from(10);
        while scale > 0 && !unscaled.is_zero() && (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale -= 1;
        }
        if unscaled.is_zero() {
            scale = 0;
        }
        Decimal::new(unscaled, scale)
    }

    /// Convert an `f64` to a decimal with exactly `scale` fractional digits
    ///
    /// The binary value is expanded exactly and rounded to the nearest
    /// value with `scale` fractional digits.
    pub fn from_f64(value: f64, scale: u32) -> Result<Decimal> {
        if !value.is_finite() {
            return Err(CodecError::range("value", value));
        }
        format!("{:.*}", scale as usize, value).parse()
    }

    /// Nearest `f64`
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Integral value as `i128`, or `None` when fractional or out of range
    pub fn to_i128(&self) -> Option<i128> {
        self.with_scale(0)?.unscaled.to_i128()
    }

    /// Absolute value of the unscaled integer, rendered in base 10
    pub(crate) fn magnitude_digits(&self) -> String {
        self.unscaled.magnitude().to_str_radix(10)
    }

    fn aligned(&self, other: &Decimal) -> (BigInt, BigInt) {
        let scale = self.scale.max(other.scale);
        let lhs = &self.unscaled * pow10(scale - self.scale);
        let rhs = &other.unscaled * pow10(scale - other.scale);
        (lhs, rhs)
    }
}

pub(crate) fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = self.aligned(other);
        lhs == rhs
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = self.aligned(other);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.magnitude_digits();
        let scale = self.scale as usize;
        if self.unscaled.is_negative() {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", int_part, frac_part)
        } else {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    /// Parse `[+-]digits[.digits]`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CodecError::range("decimal", s);

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        let mut combined = String::with_capacity(int_part.len() + frac_part.len());
        combined.push_str(int_part);
        combined.push_str(frac_part);
        if combined.is_empty() {
            combined.push('0');
        }

        let mut unscaled = BigInt::parse_bytes(combined.as_bytes(), 10).ok_or_else(invalid)?;
        if negative {
            unscaled = -unscaled;
        }

        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        Ok(Decimal::new(unscaled, scale))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(value, 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal::new(value, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}
