//! Decimal digit helpers
//!
//! Shared by the packed and zoned codecs: schema validation, sign nibbles,
//! digit extraction for encode, and value reassembly for decode.

use num_bigint::{BigInt, BigUint, Sign};
use tracing::debug;

use crate::config::DecodePolicy;
use crate::error::{CodecError, ErrorCategory, Result};
use crate::value::{pow10, Decimal, Value};

/// Largest digit count a decimal schema may declare
pub const MAX_DIGITS: u32 = 63;

/// Sign nibble written for non-negative values
pub(crate) const SIGN_POSITIVE: u8 = 0x0F;

/// Sign nibble written for negative values
pub(crate) const SIGN_NEGATIVE: u8 = 0x0D;

/// Fractional digits the approximate `f64` path can produce exactly
pub(crate) const MAX_FAST_FRACTION_DIGITS: u32 = 15;

/// Integer parts at or above this take the exact path instead
const FAST_PATH_LIMIT: f64 = 9.223_372_036_854_775_807E18;

pub(crate) fn check_schema(digits: u32, scale: u32) -> Result<()> {
    if !(1..=MAX_DIGITS).contains(&digits) {
        return Err(CodecError::range("digits", digits));
    }
    if scale > digits {
        return Err(CodecError::range("scale", scale));
    }
    Ok(())
}

pub(crate) fn sign_nibble(negative: bool) -> u8 {
    if negative {
        SIGN_NEGATIVE
    } else {
        SIGN_POSITIVE
    }
}

/// Interpret a sign nibble: `Some(true)` for negative, `None` when invalid
pub(crate) fn parse_sign(nibble: u8) -> Option<bool> {
    match nibble {
        0x0B | 0x0D => Some(true),
        0x0A | 0x0C | 0x0E | 0x0F => Some(false),
        _ => None,
    }
}

/// Sign and base-10 digit values of `value` shifted left by `scale`
///
/// Never rounds: a value with more fractional digits than `scale`, or more
/// digits in total than `digits`, fails with `LengthNotValid`.
pub(crate) fn exact_digits(value: &Decimal, digits: u32, scale: u32) -> Result<(bool, Vec<u8>)> {
    if value.scale() > scale {
        return Err(CodecError::length(
            "scale",
            format!("value scale {} exceeds schema scale {}", value.scale(), scale),
        ));
    }

    let shifted = value.unscaled() * pow10(scale - value.scale());
    let rendered = shifted.magnitude().to_str_radix(10);
    if rendered.len() > digits as usize {
        return Err(CodecError::length(
            "value",
            format!("{} digits exceed schema digit count {}", rendered.len(), digits),
        ));
    }

    let values = rendered.bytes().map(|b| b - b'0').collect();
    Ok((value.is_negative(), values))
}

/// Fixed-capacity digit buffer filled during decode
pub(crate) struct DigitBuf {
    digits: [u8; 64],
    len: usize,
}

impl DigitBuf {
    pub(crate) fn new() -> Self {
        Self {
            digits: [0; 64],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, digit: u8) {
        self.digits[self.len] = digit;
        self.len += 1;
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Exact value of the digits with `scale` fractional positions
    pub(crate) fn to_decimal(&self, negative: bool, scale: u32) -> Decimal {
        let magnitude = BigUint::from_radix_be(self.as_slice(), 10).unwrap_or_default();
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Decimal::new(BigInt::from_biguint(sign, magnitude), scale)
    }

    /// Weighted digit sum; lossy once the digits exceed `f64` precision
    pub(crate) fn to_f64(&self, negative: bool, scale: u32) -> f64 {
        let mut weight = 1.0;
        let mut sum = 0.0;
        for &digit in self.as_slice().iter().rev() {
            sum += f64::from(digit) * weight;
            weight *= 10.0;
        }
        let magnitude = sum / 10f64.powi(scale as i32);
        if negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Digits of an `f64` produced least significant first
///
/// The fraction is limited to `MAX_FAST_FRACTION_DIGITS`; positions of a
/// larger scale below that are zero.
pub(crate) struct ReverseDigits {
    zero_fill: u32,
    fraction: u64,
    fraction_left: u32,
    integer: u64,
}

impl ReverseDigits {
    /// `None` when the integer part is too large for 64-bit arithmetic
    pub(crate) fn new(magnitude: f64, scale: u32) -> Option<Self> {
        if !(0.0..FAST_PATH_LIMIT).contains(&magnitude) {
            return None;
        }

        let fraction_digits = scale.min(MAX_FAST_FRACTION_DIGITS);
        let whole = magnitude.trunc();
        let mut integer = whole as u64;

        let multiplier = 10u64.pow(fraction_digits);
        let mut fraction = ((magnitude - whole) * multiplier as f64).round() as u64;
        if fraction >= multiplier {
            fraction -= multiplier;
            integer += 1;
        }

        Some(Self {
            zero_fill: scale - fraction_digits,
            fraction,
            fraction_left: fraction_digits,
            integer,
        })
    }

    pub(crate) fn next_digit(&mut self) -> u8 {
        if self.zero_fill > 0 {
            self.zero_fill -= 1;
            0
        } else if self.fraction_left > 0 {
            self.fraction_left -= 1;
            let digit = (self.fraction % 10) as u8;
            self.fraction /= 10;
            digit
        } else {
            let digit = (self.integer % 10) as u8;
            self.integer /= 10;
            digit
        }
    }

    /// Integer digits remain after the schema's positions were consumed
    pub(crate) fn overflowed(&self) -> bool {
        self.integer != 0
    }
}

/// Turn decode errors into `Value::Null` under the permissive policy
pub(crate) fn apply_policy(result: Result<Value>, policy: DecodePolicy) -> Result<Value> {
    match (result, policy) {
        (Err(err), DecodePolicy::Permissive) if err.category() == ErrorCategory::Decode => {
            debug!(error = %err, "ignoring malformed decimal data");
            Ok(Value::Null)
        }
        (result, _) => result,
    }
}
