//! IEEE-754 floating-point codecs (big-endian)

use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, Result};
use crate::value::Value;

use super::{check_bounds, Codec, DataType, DataTypeKind};

/// 4-byte single-precision float
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float4;

/// 8-byte double-precision float
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float8;

impl Float4 {
    /// Write the IEEE bits of `value`
    pub fn encode_f32(&self, value: f32, buffer: &mut [u8], offset: usize) -> Result<usize> {
        check_bounds(buffer.len(), offset, 4)?;
        buffer[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        Ok(4)
    }

    pub fn decode_f32(&self, buffer: &[u8], offset: usize) -> Result<f32> {
        check_bounds(buffer.len(), offset, 4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&buffer[offset..offset + 4]);
        Ok(f32::from_be_bytes(raw))
    }
}

impl Float8 {
    pub fn encode_f64(&self, value: f64, buffer: &mut [u8], offset: usize) -> Result<usize> {
        check_bounds(buffer.len(), offset, 8)?;
        buffer[offset..offset + 8].copy_from_slice(&value.to_be_bytes());
        Ok(8)
    }

    pub fn decode_f64(&self, buffer: &[u8], offset: usize) -> Result<f64> {
        check_bounds(buffer.len(), offset, 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&buffer[offset..offset + 8]);
        Ok(f64::from_be_bytes(raw))
    }
}

impl DataType for Float4 {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::Float4
    }

    fn byte_length(&self) -> Result<usize> {
        Ok(4)
    }

    fn default_value(&self) -> Result<Value> {
        Ok(Value::Double(0.0))
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let wide = value.to_f64()?;
        // NaN and infinities narrow as-is; finite values must stay finite
        let narrow = wide as f32;
        if wide.is_finite() && narrow.is_infinite() {
            return Err(CodecError::range("value", wide));
        }
        self.encode_f32(narrow, buffer, offset)
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        self.decode_f32(buffer, offset).map(|v| Value::Double(f64::from(v)))
    }

    fn clone_box(&self) -> Codec {
        Box::new(*self)
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        Ok(DataTypeDescriptor::Float4)
    }
}

impl DataType for Float8 {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::Float8
    }

    fn byte_length(&self) -> Result<usize> {
        Ok(8)
    }

    fn default_value(&self) -> Result<Value> {
        Ok(Value::Double(0.0))
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        self.encode_f64(value.to_f64()?, buffer, offset)
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        self.decode_f64(buffer, offset).map(Value::Double)
    }

    fn clone_box(&self) -> Codec {
        Box::new(*self)
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        Ok(DataTypeDescriptor::Float8)
    }
}
