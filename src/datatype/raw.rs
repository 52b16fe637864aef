//! Fixed-length byte array codec

use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, Result};
use crate::value::Value;

use super::{check_bounds, Codec, DataType, DataTypeKind};

/// Raw bytes of a fixed length; short input is padded with `0x00`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteArray {
    length: usize,
}

impl ByteArray {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn encode_slice(&self, value: &[u8], buffer: &mut [u8], offset: usize) -> Result<usize> {
        check_bounds(buffer.len(), offset, self.length)?;
        if value.len() > self.length {
            return Err(CodecError::length(
                "value",
                format!("{} bytes exceed array length {}", value.len(), self.length),
            ));
        }

        let out = &mut buffer[offset..offset + self.length];
        out[..value.len()].copy_from_slice(value);
        out[value.len()..].fill(0x00);
        Ok(self.length)
    }
}

impl DataType for ByteArray {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::ByteArray
    }

    fn byte_length(&self) -> Result<usize> {
        Ok(self.length)
    }

    fn default_value(&self) -> Result<Value> {
        Ok(Value::Bytes(vec![0x00; self.length]))
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        match value {
            Value::Bytes(bytes) => self.encode_slice(bytes, buffer, offset),
            other => Err(other.mismatch("bytes")),
        }
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        check_bounds(buffer.len(), offset, self.length)?;
        Ok(Value::Bytes(buffer[offset..offset + self.length].to_vec()))
    }

    fn clone_box(&self) -> Codec {
        Box::new(*self)
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        Ok(DataTypeDescriptor::ByteArray {
            length: self.length,
        })
    }
}
