//! Data Type Module
//!
//! The codec contract shared by every host data type, plus the scalar
//! variants.
//!
//! ## Contract
//! ```text
//! byte_length()                  fixed size for the schema, never value-dependent
//! default_value()                zero/blank value for the schema
//! encode(value, buf, offset)     writes exactly byte_length() bytes
//! decode(buf, offset)            reads exactly byte_length() bytes
//! clone_box()                    independent deep copy
//! ```
//!
//! ## Variants
//! - `BinaryInteger<T>`: big-endian integers, 1/2/4/8 bytes, signed or unsigned
//! - `PackedDecimal`: two BCD digits per byte plus a sign nibble
//! - `ZonedDecimal`: one digit per byte, sign in the last zone nibble
//! - `Float4` / `Float8`: IEEE-754 big-endian
//! - `ByteArray`: fixed-length raw bytes

mod digits;
mod float;
mod integer;
mod packed;
mod raw;
mod zoned;

pub use float::{Float4, Float8};
pub use integer::{
    Bin1, Bin2, Bin4, Bin8, BinaryInteger, IntegerRepr, UnsignedBin1, UnsignedBin2, UnsignedBin4,
    UnsignedBin8,
};
pub use packed::PackedDecimal;
pub use raw::ByteArray;
pub use zoned::ZonedDecimal;

/// Largest digit count a decimal schema may declare
pub use digits::MAX_DIGITS;

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, Result};
use crate::value::Value;

/// An owned, type-erased codec
pub type Codec = Box<dyn DataType>;

/// Identifies the variant behind a `dyn DataType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeKind {
    Bin1,
    Bin2,
    Bin4,
    Bin8,
    UnsignedBin1,
    UnsignedBin2,
    UnsignedBin4,
    UnsignedBin8,
    PackedDecimal,
    ZonedDecimal,
    Float4,
    Float8,
    ByteArray,
    Array,
    Structure,
}

impl fmt::Display for DataTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Converter between a language-side [`Value`] and its host byte encoding
pub trait DataType: fmt::Debug + Send + Sync {
    /// Which variant this codec is
    fn kind(&self) -> DataTypeKind;

    /// Number of bytes every encoding of this schema occupies
    ///
    /// Fails only for composites whose members are not set.
    fn byte_length(&self) -> Result<usize>;

    /// The schema's zero/blank value
    fn default_value(&self) -> Result<Value>;

    /// Write `value` at `buffer[offset..]`, returning the bytes written
    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize>;

    /// Read one value from `buffer[offset..]`
    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value>;

    /// Deep copy behind a fresh box
    fn clone_box(&self) -> Codec;

    /// Serializable description of the schema
    fn descriptor(&self) -> Result<DataTypeDescriptor>;

    /// Encode into a newly allocated buffer of exactly `byte_length()` bytes
    fn to_bytes(&self, value: &Value) -> Result<Bytes> {
        let len = self.byte_length()?;
        let mut buffer = BytesMut::zeroed(len);
        self.encode(value, &mut buffer, 0)?;
        Ok(buffer.freeze())
    }

    /// Decode from the start of `bytes`
    fn from_bytes(&self, bytes: &[u8]) -> Result<Value> {
        self.decode(bytes, 0)
    }
}

impl Clone for Codec {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Fail unless `buffer[offset..offset + needed]` is addressable
pub(crate) fn check_bounds(available: usize, offset: usize, needed: usize) -> Result<()> {
    match offset.checked_add(needed) {
        Some(end) if end <= available => Ok(()),
        _ => Err(CodecError::IndexOutOfRange {
            offset,
            needed,
            available,
        }),
    }
}
