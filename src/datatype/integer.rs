//! Binary integer codecs
//!
//! Big-endian, two's complement for signed variants, no padding. One generic
//! codec covers every width; the aliases name the host types.
//!
//! | Alias          | Rust type | Bytes | Range               |
//! |----------------|-----------|-------|---------------------|
//! | `Bin1`         | `i8`      | 1     | -128..=127          |
//! | `Bin2`         | `i16`     | 2     | -32768..=32767      |
//! | `Bin4`         | `i32`     | 4     | -2^31..=2^31-1      |
//! | `Bin8`         | `i64`     | 8     | -2^63..=2^63-1      |
//! | `UnsignedBin1` | `u8`      | 1     | 0..=255             |
//! | `UnsignedBin2` | `u16`     | 2     | 0..=65535           |
//! | `UnsignedBin4` | `u32`     | 4     | 0..=2^32-1          |
//! | `UnsignedBin8` | `u64`     | 8     | 0..=2^64-1          |

use std::fmt;
use std::marker::PhantomData;

use num_traits::NumCast;

use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, Result};
use crate::value::Value;

use super::{check_bounds, Codec, DataType, DataTypeKind};

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer backing a [`BinaryInteger`] codec
pub trait IntegerRepr: sealed::Sealed + NumCast + Copy + fmt::Debug + Send + Sync + 'static {
    /// Encoded width in bytes
    const WIDTH: usize;

    const KIND: DataTypeKind;

    const DESCRIPTOR: DataTypeDescriptor;

    fn write_be(self, out: &mut [u8]);

    fn read_be(bytes: &[u8]) -> Self;

    fn into_value(self) -> Value;
}

macro_rules! impl_integer_repr {
    ($($ty:ty => $kind:ident, $variant:ident, $wide:ty;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl IntegerRepr for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const KIND: DataTypeKind = DataTypeKind::$kind;
                const DESCRIPTOR: DataTypeDescriptor = DataTypeDescriptor::$kind;

                fn write_be(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_be_bytes());
                }

                fn read_be(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_be_bytes(raw)
                }

                fn into_value(self) -> Value {
                    Value::$variant(<$wide as From<$ty>>::from(self))
                }
            }
        )*
    };
}

impl_integer_repr! {
    i8 => Bin1, Signed, i64;
    i16 => Bin2, Signed, i64;
    i32 => Bin4, Signed, i64;
    i64 => Bin8, Signed, i64;
    u8 => UnsignedBin1, Unsigned, u64;
    u16 => UnsignedBin2, Unsigned, u64;
    u32 => UnsignedBin4, Unsigned, u64;
    u64 => UnsignedBin8, Unsigned, u64;
}

/// Fixed-width big-endian integer codec
pub struct BinaryInteger<T> {
    _repr: PhantomData<fn() -> T>,
}

pub type Bin1 = BinaryInteger<i8>;
pub type Bin2 = BinaryInteger<i16>;
pub type Bin4 = BinaryInteger<i32>;
pub type Bin8 = BinaryInteger<i64>;
pub type UnsignedBin1 = BinaryInteger<u8>;
pub type UnsignedBin2 = BinaryInteger<u16>;
pub type UnsignedBin4 = BinaryInteger<u32>;
pub type UnsignedBin8 = BinaryInteger<u64>;

impl<T: IntegerRepr> BinaryInteger<T> {
    pub fn new() -> Self {
        Self { _repr: PhantomData }
    }

    /// Encode a value of the native width (cannot be out of range)
    pub fn encode_int(&self, value: T, buffer: &mut [u8], offset: usize) -> Result<usize> {
        check_bounds(buffer.len(), offset, T::WIDTH)?;
        value.write_be(&mut buffer[offset..offset + T::WIDTH]);
        Ok(T::WIDTH)
    }

    pub fn decode_int(&self, buffer: &[u8], offset: usize) -> Result<T> {
        check_bounds(buffer.len(), offset, T::WIDTH)?;
        Ok(T::read_be(&buffer[offset..offset + T::WIDTH]))
    }
}

impl<T: IntegerRepr> Default for BinaryInteger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BinaryInteger<T> {
    fn clone(&self) -> Self {
        Self { _repr: PhantomData }
    }
}

impl<T> Copy for BinaryInteger<T> {}

impl<T: IntegerRepr> fmt::Debug for BinaryInteger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", T::KIND)
    }
}

impl<T: IntegerRepr> DataType for BinaryInteger<T> {
    fn kind(&self) -> DataTypeKind {
        T::KIND
    }

    fn byte_length(&self) -> Result<usize> {
        Ok(T::WIDTH)
    }

    fn default_value(&self) -> Result<Value> {
        Ok(T::read_be(&[0u8; 8][..T::WIDTH]).into_value())
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let wide = value.to_i128()?;
        let narrow: T = NumCast::from(wide).ok_or_else(|| CodecError::range("value", wide))?;
        self.encode_int(narrow, buffer, offset)
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        self.decode_int(buffer, offset).map(IntegerRepr::into_value)
    }

    fn clone_box(&self) -> Codec {
        Box::new(*self)
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        Ok(T::DESCRIPTOR)
    }
}
