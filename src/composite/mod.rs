//! Composite Module
//!
//! Codecs built from other codecs.
//!
//! ## Structure Lifecycle
//! ```text
//!   new()            set_members()          byte_length / encode / decode
//! ┌───────┐        ┌─────────┐            ┌────────┐
//! │ Unset │ ─────► │ Mutable │ ─────────► │ Frozen │
//! └───────┘        └─────────┘            └────────┘
//!  conversions      set_members/           set_members/set_member
//!  fail with        set_member allowed     fail with PropertyNotChanged
//!  PropertyNotSet
//! ```

mod array;
mod structure;

pub use array::Array;
pub use structure::{Phase, Structure};
