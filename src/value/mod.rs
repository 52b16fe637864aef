//! Value Module
//!
//! Language-side values exchanged with the codecs.
//!
//! ## Mapping
//! - Binary integers   ↔ `Signed` / `Unsigned`
//! - Packed/zoned      ↔ `Decimal` (exact) or `Double` (double mode)
//! - Floats            ↔ `Double`
//! - Byte arrays       ↔ `Bytes`
//! - Structures/arrays ↔ `List`, one entry per member/element
//! - Permissive decode of malformed data ↔ `Null`

mod decimal;

pub use decimal::Decimal;
pub(crate) use decimal::pow10;

use crate::error::{CodecError, Result};

/// A value to encode, or the result of a decode
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (permissive decode of malformed bytes)
    Null,

    /// Signed integer
    Signed(i64),

    /// Unsigned integer
    Unsigned(u64),

    /// Exact fixed-point decimal
    Decimal(Decimal),

    /// Floating-point approximation
    Double(f64),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Ordered composite value
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Signed(_) => "signed integer",
            Value::Unsigned(_) => "unsigned integer",
            Value::Decimal(_) => "decimal",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Signed(v) => Some(*v),
            Value::Unsigned(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            Value::Signed(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Conversions used by the codecs
    // -------------------------------------------------------------------------

    /// Integer-shaped value widened to `i128`
    ///
    /// Accepts `Signed`, `Unsigned`, and integral `Decimal` values.
    pub(crate) fn to_i128(&self) -> Result<i128> {
        match self {
            Value::Signed(v) => Ok(i128::from(*v)),
            Value::Unsigned(v) => Ok(i128::from(*v)),
            Value::Decimal(d) => d.to_i128().ok_or_else(|| CodecError::range("value", d)),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Exact decimal view of a numeric value
    pub(crate) fn to_decimal(&self) -> Result<Decimal> {
        match self {
            Value::Signed(v) => Ok(Decimal::from(*v)),
            Value::Unsigned(v) => Ok(Decimal::from(*v)),
            Value::Decimal(d) => Ok(d.clone()),
            other => Err(other.mismatch("decimal")),
        }
    }

    /// Floating-point view of a numeric value
    pub(crate) fn to_f64(&self) -> Result<f64> {
        match self {
            Value::Double(v) => Ok(*v),
            Value::Signed(v) => Ok(*v as f64),
            Value::Unsigned(v) => Ok(*v as f64),
            Value::Decimal(d) => Ok(d.to_f64()),
            other => Err(other.mismatch("double")),
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> CodecError {
        CodecError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

impl_from_int!(Signed, i64: i8, i16, i32, i64);
impl_from_int!(Unsigned, u64: u8, u16, u32, u64);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
