//! Packed decimal codec
//!
//! ## Layout
//! ```text
//! digits = 5, value = -123.45 (scale 2)
//! ┌──────┬──────┬──────┐
//! │ 1  2 │ 3  4 │ 5  D │
//! └──────┴──────┴──────┘
//!                    └── sign nibble: F (+) / D (-)
//! ```
//! Byte length is `digits / 2 + 1`. An even digit count leaves one spare
//! leading nibble, which is always zero on encode.

use tracing::trace;

use crate::config::{Config, DecimalMode};
use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, NibbleHalf, Result};
use crate::value::{Decimal, Value};

use super::digits::{self, DigitBuf, ReverseDigits};
use super::{check_bounds, Codec, DataType, DataTypeKind};

/// Largest encoded size (63 digits)
const MAX_LEN: usize = (digits::MAX_DIGITS / 2 + 1) as usize;

/// Fixed-point decimal stored as BCD nibbles plus a sign nibble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedDecimal {
    digits: u32,
    scale: u32,
    config: Config,
}

impl PackedDecimal {
    /// Create a codec with the default (exact, strict) config
    ///
    /// `digits` must be 1..=63 and `scale` at most `digits`.
    pub fn new(digits: u32, scale: u32) -> Result<Self> {
        Self::with_config(digits, scale, &Config::default())
    }

    pub fn with_config(digits: u32, scale: u32, config: &Config) -> Result<Self> {
        digits::check_schema(digits, scale)?;
        Ok(Self {
            digits,
            scale,
            config: *config,
        })
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        (self.digits / 2 + 1) as usize
    }

    // =========================================================================
    // Encode
    // =========================================================================

    /// Encode an exact decimal
    ///
    /// Fails with `LengthNotValid` when the value's scale exceeds the schema
    /// scale or its digits do not fit; the codec never rounds.
    pub fn encode_decimal(&self, value: &Decimal, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let len = self.encoded_len();
        check_bounds(buffer.len(), offset, len)?;

        let (negative, nibbles) = digits::exact_digits(value, self.digits, self.scale)?;
        let out = &mut buffer[offset..offset + len];

        // Nibbles in front of the sign: always odd, so the first digit may
        // start on either half of a byte.
        let leading = (2 * len - 1) - nibbles.len();
        let mut pos = 0;
        for _ in 0..leading / 2 {
            out[pos] = 0x00;
            pos += 1;
        }

        let mut next = 0;
        if leading % 2 == 1 {
            out[pos] = nibbles[0];
            pos += 1;
            next = 1;
        }

        while next + 1 < nibbles.len() {
            out[pos] = (nibbles[next] << 4) | nibbles[next + 1];
            pos += 1;
            next += 2;
        }

        out[pos] = (nibbles[next] << 4) | digits::sign_nibble(negative);
        Ok(len)
    }

    /// Encode an `f64` without big-integer allocation
    ///
    /// At most 15 fractional digits are produced; any further scale
    /// positions are written as zero. Integer parts beyond 64-bit range are
    /// handed to the exact path.
    pub fn encode_f64(&self, value: f64, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let len = self.encoded_len();
        check_bounds(buffer.len(), offset, len)?;

        if !value.is_finite() {
            return Err(CodecError::range("value", value));
        }

        let mut reverse = match ReverseDigits::new(value.abs(), self.scale) {
            Some(reverse) => reverse,
            None => {
                let exact = Decimal::from_f64(value, self.scale)?;
                return self.encode_decimal(&exact, buffer, offset);
            }
        };

        let mut scratch = [0u8; MAX_LEN];
        let out = &mut scratch[..len];
        let mut nonzero = false;

        // Digit k sits in the high nibble when even, the low nibble when odd,
        // counting leftwards from the sign byte.
        for k in 0..self.digits as usize {
            let digit = reverse.next_digit();
            nonzero |= digit != 0;
            let index = len - 1 - (k + 1) / 2;
            if k % 2 == 0 {
                out[index] |= digit << 4;
            } else {
                out[index] |= digit;
            }
        }

        if reverse.overflowed() {
            return Err(CodecError::range("value", value));
        }

        out[len - 1] |= digits::sign_nibble(value < 0.0 && nonzero);
        buffer[offset..offset + len].copy_from_slice(out);
        Ok(len)
    }

    // =========================================================================
    // Decode
    // =========================================================================

    /// Decode to an exact decimal, failing on malformed nibbles
    pub fn decode_decimal(&self, buffer: &[u8], offset: usize) -> Result<Decimal> {
        let (negative, read) = self.read_digits(buffer, offset)?;
        Ok(read.to_decimal(negative, self.scale))
    }

    /// Decode to an `f64` approximation, failing on malformed nibbles
    pub fn decode_f64(&self, buffer: &[u8], offset: usize) -> Result<f64> {
        let (negative, read) = self.read_digits(buffer, offset)?;
        Ok(read.to_f64(negative, self.scale))
    }

    /// Validate every nibble and collect the digits left to right
    fn read_digits(&self, buffer: &[u8], offset: usize) -> Result<(bool, DigitBuf)> {
        let len = self.encoded_len();
        check_bounds(buffer.len(), offset, len)?;
        let bytes = &buffer[offset..offset + len];

        let last = bytes[len - 1];
        let negative = digits::parse_sign(last & 0x0F).ok_or(CodecError::InvalidNibble {
            half: NibbleHalf::Low,
            offset: offset + len - 1,
            byte: last,
        })?;

        let mut read = DigitBuf::new();
        for (i, &byte) in bytes.iter().enumerate() {
            let high = byte >> 4;
            if high > 9 {
                return Err(CodecError::InvalidNibble {
                    half: NibbleHalf::High,
                    offset: offset + i,
                    byte,
                });
            }
            read.push(high);

            if i == len - 1 {
                break;
            }

            let low = byte & 0x0F;
            if low > 9 {
                return Err(CodecError::InvalidNibble {
                    half: NibbleHalf::Low,
                    offset: offset + i,
                    byte,
                });
            }
            read.push(low);
        }

        trace!(negative, digits = read.as_slice().len(), "packed decimal read");
        Ok((negative, read))
    }
}

impl DataType for PackedDecimal {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::PackedDecimal
    }

    fn byte_length(&self) -> Result<usize> {
        Ok(self.encoded_len())
    }

    fn default_value(&self) -> Result<Value> {
        Ok(match self.config.decimal_mode {
            DecimalMode::Exact => Value::Decimal(Decimal::new(0, self.scale)),
            DecimalMode::Double => Value::Double(0.0),
        })
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        match value {
            Value::Double(v) => self.encode_f64(*v, buffer, offset),
            other => self.encode_decimal(&other.to_decimal()?, buffer, offset),
        }
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        let result = match self.config.decimal_mode {
            DecimalMode::Exact => self.decode_decimal(buffer, offset).map(Value::Decimal),
            DecimalMode::Double => self.decode_f64(buffer, offset).map(Value::Double),
        };
        digits::apply_policy(result, self.config.decode_policy)
    }

    fn clone_box(&self) -> Codec {
        Box::new(self.clone())
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        Ok(DataTypeDescriptor::PackedDecimal {
            digits: self.digits,
            scale: self.scale,
        })
    }
}
