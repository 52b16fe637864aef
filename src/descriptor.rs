//! Schema descriptors
//!
//! Serializable description of a codec tree. Record layouts can be stored or
//! shipped as descriptors and turned into live codecs with [`DataTypeDescriptor::build`].

use serde::{Deserialize, Serialize};

use crate::composite::{Array, Structure};
use crate::config::Config;
use crate::datatype::{
    Bin1, Bin2, Bin4, Bin8, ByteArray, Codec, DataTypeKind, Float4, Float8, PackedDecimal,
    UnsignedBin1, UnsignedBin2, UnsignedBin4, UnsignedBin8, ZonedDecimal,
};
use crate::error::Result;

/// Schema of one codec, including nested members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataTypeDescriptor {
    Bin1,
    Bin2,
    Bin4,
    Bin8,
    UnsignedBin1,
    UnsignedBin2,
    UnsignedBin4,
    UnsignedBin8,
    PackedDecimal { digits: u32, scale: u32 },
    ZonedDecimal { digits: u32, scale: u32 },
    Float4,
    Float8,
    ByteArray { length: usize },
    Array { element: Box<DataTypeDescriptor>, count: usize },
    Structure { members: Vec<DataTypeDescriptor> },
}

impl DataTypeDescriptor {
    pub fn kind(&self) -> DataTypeKind {
        match self {
            DataTypeDescriptor::Bin1 => DataTypeKind::Bin1,
            DataTypeDescriptor::Bin2 => DataTypeKind::Bin2,
            DataTypeDescriptor::Bin4 => DataTypeKind::Bin4,
            DataTypeDescriptor::Bin8 => DataTypeKind::Bin8,
            DataTypeDescriptor::UnsignedBin1 => DataTypeKind::UnsignedBin1,
            DataTypeDescriptor::UnsignedBin2 => DataTypeKind::UnsignedBin2,
            DataTypeDescriptor::UnsignedBin4 => DataTypeKind::UnsignedBin4,
            DataTypeDescriptor::UnsignedBin8 => DataTypeKind::UnsignedBin8,
            DataTypeDescriptor::PackedDecimal { .. } => DataTypeKind::PackedDecimal,
            DataTypeDescriptor::ZonedDecimal { .. } => DataTypeKind::ZonedDecimal,
            DataTypeDescriptor::Float4 => DataTypeKind::Float4,
            DataTypeDescriptor::Float8 => DataTypeKind::Float8,
            DataTypeDescriptor::ByteArray { .. } => DataTypeKind::ByteArray,
            DataTypeDescriptor::Array { .. } => DataTypeKind::Array,
            DataTypeDescriptor::Structure { .. } => DataTypeKind::Structure,
        }
    }

    /// Instantiate the codec tree; `config` applies to every decimal in it
    ///
    /// Schema errors (e.g. scale above digit count, empty structure) are
    /// reported exactly as the codec constructors report them.
    pub fn build(&self, config: &Config) -> Result<Codec> {
        let codec: Codec = match self {
            DataTypeDescriptor::Bin1 => Box::new(Bin1::new()),
            DataTypeDescriptor::Bin2 => Box::new(Bin2::new()),
            DataTypeDescriptor::Bin4 => Box::new(Bin4::new()),
            DataTypeDescriptor::Bin8 => Box::new(Bin8::new()),
            DataTypeDescriptor::UnsignedBin1 => Box::new(UnsignedBin1::new()),
            DataTypeDescriptor::UnsignedBin2 => Box::new(UnsignedBin2::new()),
            DataTypeDescriptor::UnsignedBin4 => Box::new(UnsignedBin4::new()),
            DataTypeDescriptor::UnsignedBin8 => Box::new(UnsignedBin8::new()),
            DataTypeDescriptor::PackedDecimal { digits, scale } => {
                Box::new(PackedDecimal::with_config(*digits, *scale, config)?)
            }
            DataTypeDescriptor::ZonedDecimal { digits, scale } => {
                Box::new(ZonedDecimal::with_config(*digits, *scale, config)?)
            }
            DataTypeDescriptor::Float4 => Box::new(Float4),
            DataTypeDescriptor::Float8 => Box::new(Float8),
            DataTypeDescriptor::ByteArray { length } => Box::new(ByteArray::new(*length)),
            DataTypeDescriptor::Array { element, count } => {
                Box::new(Array::new(element.build(config)?, *count))
            }
            DataTypeDescriptor::Structure { members } => {
                let members = members
                    .iter()
                    .map(|member| member.build(config))
                    .collect::<Result<Vec<_>>>()?;
                Box::new(Structure::with_members(members)?)
            }
        };
        Ok(codec)
    }
}
