//! Error types for hostcodec
//!
//! Provides a unified error type for all conversions. Every variant carries
//! enough context (offset, raw byte, schema parameter) to diagnose a failure
//! without re-deriving it.

use std::fmt;

use thiserror::Error;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Which half of a byte a nibble error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NibbleHalf {
    High,
    Low,
}

impl fmt::Display for NibbleHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NibbleHalf::High => f.write_str("high"),
            NibbleHalf::Low => f.write_str("low"),
        }
    }
}

/// Coarse classification of a [`CodecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid schema parameters at construction time
    Schema,
    /// Structure lifecycle violation (unset members, mutation after freeze)
    State,
    /// Value cannot be represented by the schema
    Range,
    /// Bytes are not a valid encoding for the schema
    Decode,
    /// Caller-supplied buffer or index is too small
    Bounds,
}

/// Unified error type for hostcodec operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // Schema / Range Errors
    // -------------------------------------------------------------------------
    #[error("Range not valid: {parameter} = {value}")]
    RangeNotValid {
        parameter: &'static str,
        value: String,
    },

    #[error("Length not valid: {parameter} ({detail})")]
    LengthNotValid {
        parameter: &'static str,
        detail: String,
    },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    // -------------------------------------------------------------------------
    // State Errors
    // -------------------------------------------------------------------------
    #[error("Property not set: {0}")]
    PropertyNotSet(&'static str),

    #[error("Property not changed: {0}")]
    PropertyNotChanged(&'static str),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {half} nibble in byte at offset {offset}: 0x{byte:02X}")]
    InvalidNibble {
        half: NibbleHalf,
        offset: usize,
        byte: u8,
    },

    // -------------------------------------------------------------------------
    // Bounds Errors
    // -------------------------------------------------------------------------
    #[error("Index out of range: need {needed} bytes at offset {offset}, buffer holds {available}")]
    IndexOutOfRange {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Member index {index} out of range (structure has {count} members)")]
    MemberIndexOutOfRange { index: usize, count: usize },
}

impl CodecError {
    /// Classify this error by taxonomy class
    ///
    /// `RangeNotValid` is shared by construction and encode; the parameter
    /// name decides which class it belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CodecError::RangeNotValid { parameter, .. } if is_schema_parameter(parameter) => {
                ErrorCategory::Schema
            }
            CodecError::RangeNotValid { .. }
            | CodecError::LengthNotValid { .. }
            | CodecError::TypeMismatch { .. } => ErrorCategory::Range,
            CodecError::PropertyNotSet(_) | CodecError::PropertyNotChanged(_) => {
                ErrorCategory::State
            }
            CodecError::InvalidNibble { .. } => ErrorCategory::Decode,
            CodecError::IndexOutOfRange { .. } | CodecError::MemberIndexOutOfRange { .. } => {
                ErrorCategory::Bounds
            }
        }
    }

    pub(crate) fn range(parameter: &'static str, value: impl fmt::Display) -> Self {
        CodecError::RangeNotValid {
            parameter,
            value: value.to_string(),
        }
    }

    pub(crate) fn length(parameter: &'static str, detail: impl Into<String>) -> Self {
        CodecError::LengthNotValid {
            parameter,
            detail: detail.into(),
        }
    }
}

/// Parameters that only appear in construction-time range checks
const SCHEMA_PARAMETERS: &[&str] = &["digits", "scale"];

fn is_schema_parameter(parameter: &str) -> bool {
    SCHEMA_PARAMETERS.contains(&parameter)
}
