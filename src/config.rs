//! Configuration for hostcodec
//!
//! Conversion policy shared by the decimal codecs. A codec copies the policy
//! at construction; changing a `Config` afterwards never affects codecs
//! already built from it.

use serde::{Deserialize, Serialize};

/// Conversion policy for decimal codecs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Value Representation
    // -------------------------------------------------------------------------
    /// How decoded decimals are represented
    pub decimal_mode: DecimalMode,

    // -------------------------------------------------------------------------
    // Decode Policy
    // -------------------------------------------------------------------------
    /// What happens when the bytes are not a valid encoding
    pub decode_policy: DecodePolicy,
}

/// Representation of decoded decimal values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecimalMode {
    /// Exact arbitrary-precision `Decimal` (default)
    #[default]
    Exact,

    /// `f64` approximation (no big-integer allocation, lossy for large digit counts)
    Double,
}

/// Handling of malformed input during decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Fail with a decode error (default)
    #[default]
    Strict,

    /// Return `Value::Null` instead of failing (best-effort scanning)
    Permissive,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Shorthand for a config with `DecimalMode::Double`
    pub fn double() -> Self {
        Self::builder().decimal_mode(DecimalMode::Double).build()
    }

    /// Shorthand for a config with `DecodePolicy::Permissive`
    pub fn permissive() -> Self {
        Self::builder().decode_policy(DecodePolicy::Permissive).build()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set how decoded decimals are represented
    pub fn decimal_mode(mut self, mode: DecimalMode) -> Self {
        self.config.decimal_mode = mode;
        self
    }

    /// Set the decode error policy
    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.config.decode_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
