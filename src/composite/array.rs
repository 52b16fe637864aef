//! Array codec
//!
//! A fixed number of elements sharing one element codec.

use crate::datatype::{check_bounds, Codec, DataType, DataTypeKind};
use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, Result};
use crate::value::Value;

/// Homogeneous fixed-count array
#[derive(Debug, Clone)]
pub struct Array {
    element: Codec,
    count: usize,
}

impl Array {
    /// Create an array of `count` elements; the element codec is owned
    pub fn new(element: Codec, count: usize) -> Self {
        Self { element, count }
    }

    /// Deep copy of the element codec
    pub fn element(&self) -> Codec {
        self.element.clone()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Element stride and total encoded size
    fn span(&self) -> Result<(usize, usize)> {
        let stride = self.element.byte_length()?;
        let total = stride.checked_mul(self.count).ok_or_else(|| {
            CodecError::length(
                "count",
                format!("{} elements of {} bytes overflow usize", self.count, stride),
            )
        })?;
        Ok((stride, total))
    }
}

impl DataType for Array {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::Array
    }

    fn byte_length(&self) -> Result<usize> {
        self.span().map(|(_, total)| total)
    }

    fn default_value(&self) -> Result<Value> {
        self.span()?;
        let element = self.element.default_value()?;
        Ok(Value::List(vec![element; self.count]))
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let values = value.as_list().ok_or_else(|| value.mismatch("list"))?;
        if values.len() != self.count {
            return Err(CodecError::length(
                "value",
                format!("{} values for {} elements", values.len(), self.count),
            ));
        }

        let (stride, total) = self.span()?;
        check_bounds(buffer.len(), offset, total)?;

        for (i, item) in values.iter().enumerate() {
            self.element.encode(item, buffer, offset + i * stride)?;
        }
        Ok(total)
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        let (stride, total) = self.span()?;
        check_bounds(buffer.len(), offset, total)?;

        (0..self.count)
            .map(|i| self.element.decode(buffer, offset + i * stride))
            .collect::<Result<Vec<_>>>()
            .map(Value::List)
    }

    fn clone_box(&self) -> Codec {
        Box::new(self.clone())
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        Ok(DataTypeDescriptor::Array {
            element: Box::new(self.element.descriptor()?),
            count: self.count,
        })
    }
}
