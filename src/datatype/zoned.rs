//! Zoned decimal codec
//!
//! ## Layout
//! ```text
//! digits = 5, value = -123.45 (scale 2)
//! ┌────┬────┬────┬────┬────┐
//! │ F1 │ F2 │ F3 │ F4 │ D5 │
//! └────┴────┴────┴────┴────┘
//!                       └── zone of the last byte carries the sign
//! ```
//! One digit per byte; byte length equals the digit count.

use crate::config::{Config, DecimalMode};
use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, NibbleHalf, Result};
use crate::value::{Decimal, Value};

use super::digits::{self, DigitBuf, ReverseDigits};
use super::{check_bounds, Codec, DataType, DataTypeKind};

/// Zone nibble of every byte except the last
const ZONE: u8 = 0xF0;

/// Fixed-point decimal stored one digit per byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDecimal {
    digits: u32,
    scale: u32,
    config: Config,
}

impl ZonedDecimal {
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

    pub fn encoded_len(&self) -> usize {
        self.digits as usize
    }

    pub fn encode_decimal(&self, value: &Decimal, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let len = self.encoded_len();
        check_bounds(buffer.len(), offset, len)?;

        let (negative, nibbles) = digits::exact_digits(value, self.digits, self.scale)?;
        let out = &mut buffer[offset..offset + len];

        let leading = len - nibbles.len();
        out[..leading].fill(ZONE);
        for (slot, &digit) in out[leading..].iter_mut().zip(&nibbles) {
            *slot = ZONE | digit;
        }
        out[len - 1] = (digits::sign_nibble(negative) << 4) | (out[len - 1] & 0x0F);
        Ok(len)
    }

    /// Encode an `f64`, with the same precision limits as the packed codec
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

        let mut scratch = [0u8; digits::MAX_DIGITS as usize];
        let out = &mut scratch[..len];
        let mut nonzero = false;
        for slot in out.iter_mut().rev() {
            let digit = reverse.next_digit();
            nonzero |= digit != 0;
            *slot = ZONE | digit;
        }

        if reverse.overflowed() {
            return Err(CodecError::range("value", value));
        }

        let sign = digits::sign_nibble(value < 0.0 && nonzero);
        out[len - 1] = (sign << 4) | (out[len - 1] & 0x0F);
        buffer[offset..offset + len].copy_from_slice(out);
        Ok(len)
    }

    pub fn decode_decimal(&self, buffer: &[u8], offset: usize) -> Result<Decimal> {
        let (negative, read) = self.read_digits(buffer, offset)?;
        Ok(read.to_decimal(negative, self.scale))
    }

    pub fn decode_f64(&self, buffer: &[u8], offset: usize) -> Result<f64> {
        let (negative, read) = self.read_digits(buffer, offset)?;
        Ok(read.to_f64(negative, self.scale))
    }

    /// Digit nibbles are validated; only the last zone nibble is read (sign)
    fn read_digits(&self, buffer: &[u8], offset: usize) -> Result<(bool, DigitBuf)> {
        let len = self.encoded_len();
        check_bounds(buffer.len(), offset, len)?;
        let bytes = &buffer[offset..offset + len];

        let last = bytes[len - 1];
        let negative = digits::parse_sign(last >> 4).ok_or(CodecError::InvalidNibble {
            half: NibbleHalf::High,
            offset: offset + len - 1,
            byte: last,
        })?;

        let mut read = DigitBuf::new();
        for (i, &byte) in bytes.iter().enumerate() {
            let digit = byte & 0x0F;
            if digit > 9 {
                return Err(CodecError::InvalidNibble {
                    half: NibbleHalf::Low,
                    offset: offset + i,
                    byte,
                });
            }
            read.push(digit);
        }
        Ok((negative, read))
    }
}

impl DataType for ZonedDecimal {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::ZonedDecimal
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
        Ok(DataTypeDescriptor::ZonedDecimal {
            digits: self.digits,
            scale: self.scale,
        })
    }
}
