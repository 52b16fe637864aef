//! # hostcodec
//!
//! Bit-exact converters between Rust values and the fixed-width byte
//! encodings a host system uses in its records and program-call parameters:
//! - Packed decimal (BCD nibbles + sign nibble) and zoned decimal
//! - Signed/unsigned big-endian binary integers of 1, 2, 4, 8 bytes
//! - IEEE floats and fixed-length byte arrays
//! - Structures and arrays composed from the above
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │        Record I/O / Parameter Marshalling / RPC             │
//! │                   (external callers)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ encode / decode / byte_length
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 DataType contract                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │  Composite  │ ───────► │   Scalars    │
//!   │ (Structure, │ members  │ (integers,   │
//!   │   Array)    │          │  decimals)   │
//!   └─────────────┘          └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use hostcodec::{DataType, Decimal, PackedDecimal, Value};
//!
//! let codec = PackedDecimal::new(5, 2).unwrap();
//! let value = Value::Decimal("-123.45".parse::<Decimal>().unwrap());
//! let bytes = codec.to_bytes(&value).unwrap();
//! assert_eq!(&bytes[..], &[0x12, 0x34, 0x5D]);
//! assert_eq!(codec.from_bytes(&bytes).unwrap(), value);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod datatype;
pub mod composite;
pub mod descriptor;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, ErrorCategory, NibbleHalf, Result};
pub use config::{Config, DecimalMode, DecodePolicy};
pub use value::{Decimal, Value};
pub use datatype::{
    Bin1, Bin2, Bin4, Bin8, BinaryInteger, ByteArray, Codec, DataType, DataTypeKind, Float4,
    Float8, PackedDecimal, UnsignedBin1, UnsignedBin2, UnsignedBin4, UnsignedBin8, ZonedDecimal,
};
pub use composite::{Array, Phase, Structure};
pub use descriptor::DataTypeDescriptor;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of hostcodec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
