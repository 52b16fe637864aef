//! Structure codec
//!
//! An ordered list of member codecs encoded back to back as one record.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::datatype::{check_bounds, Codec, DataType, DataTypeKind};
use crate::descriptor::DataTypeDescriptor;
use crate::error::{CodecError, Result};
use crate::value::Value;

/// Lifecycle of a structure's member list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No members yet; every conversion fails with `PropertyNotSet`
    Unset,

    /// Members set and still replaceable
    Mutable,

    /// Used at least once; members can no longer change
    Frozen,
}

#[derive(Debug, Clone)]
struct State {
    phase: Phase,
    members: Vec<Codec>,
    /// Lazily built from the members, cleared when they are replaced
    default_value: Option<Vec<Value>>,
}

impl State {
    /// Commit the schema on first use
    fn freeze(&mut self) -> Result<()> {
        match self.phase {
            Phase::Unset => Err(CodecError::PropertyNotSet("members")),
            Phase::Mutable => {
                self.phase = Phase::Frozen;
                debug!(members = self.members.len(), "structure frozen");
                Ok(())
            }
            Phase::Frozen => Ok(()),
        }
    }

    fn check_mutable(&self) -> Result<()> {
        match self.phase {
            Phase::Frozen => Err(CodecError::PropertyNotChanged("members")),
            Phase::Unset | Phase::Mutable => Ok(()),
        }
    }

    fn byte_length(&self) -> Result<usize> {
        self.members.iter().try_fold(0usize, |total, member| {
            total.checked_add(member.byte_length()?).ok_or_else(|| {
                CodecError::length("members", "combined member length overflows usize")
            })
        })
    }
}

/// Composite codec over an ordered, heterogeneous member list
///
/// ## Concurrency
/// - Member list, phase, and default-value cache share one `Mutex`
/// - All methods take `&self`; one thread may finish `set_members` while
///   another already calls `byte_length`
/// - Members are owned boxes, never aliased with codecs the caller holds
#[derive(Debug)]
pub struct Structure {
    state: Mutex<State>,
}

impl Structure {
    /// Create a structure with no members
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                phase: Phase::Unset,
                members: Vec::new(),
                default_value: None,
            }),
        }
    }

    /// Create a structure from an initial member list
    pub fn with_members(members: Vec<Codec>) -> Result<Self> {
        let structure = Self::new();
        structure.set_members(members)?;
        Ok(structure)
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Deep copies of the current members, in order
    pub fn members(&self) -> Vec<Codec> {
        self.state.lock().members.clone()
    }

    pub fn member_count(&self) -> usize {
        self.state.lock().members.len()
    }

    /// Replace the whole member list
    ///
    /// Fails with `PropertyNotChanged` once the structure has been used and
    /// with `LengthNotValid` for an empty list.
    pub fn set_members(&self, members: Vec<Codec>) -> Result<()> {
        let mut state = self.state.lock();
        state.check_mutable()?;
        if members.is_empty() {
            return Err(CodecError::length("members", "member list is empty"));
        }

        debug!(members = members.len(), "structure members set");
        state.members = members;
        state.phase = Phase::Mutable;
        state.default_value = None;
        Ok(())
    }

    /// Replace the member at `index`
    pub fn set_member(&self, index: usize, member: Codec) -> Result<()> {
        let mut state = self.state.lock();
        state.check_mutable()?;
        if state.phase == Phase::Unset {
            return Err(CodecError::PropertyNotSet("members"));
        }

        let count = state.members.len();
        if index >= count {
            return Err(CodecError::MemberIndexOutOfRange { index, count });
        }

        let slot_default = member.default_value().ok();
        state.default_value = match (state.default_value.take(), slot_default) {
            (Some(mut cached), Some(value)) => {
                cached[index] = value;
                Some(cached)
            }
            _ => None,
        };

        debug!(index, kind = %member.kind(), "structure member replaced");
        state.members[index] = member;
        Ok(())
    }
}

impl Default for Structure {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Structure {
    fn clone(&self) -> Self {
        Self {
            state: Mutex::new(self.state.lock().clone()),
        }
    }
}

impl DataType for Structure {
    fn kind(&self) -> DataTypeKind {
        DataTypeKind::Structure
    }

    fn byte_length(&self) -> Result<usize> {
        let mut state = self.state.lock();
        state.freeze()?;
        state.byte_length()
    }

    fn default_value(&self) -> Result<Value> {
        let mut state = self.state.lock();
        if state.phase == Phase::Unset {
            return Err(CodecError::PropertyNotSet("members"));
        }

        if let Some(cached) = &state.default_value {
            return Ok(Value::List(cached.clone()));
        }

        let values = state
            .members
            .iter()
            .map(|member| member.default_value())
            .collect::<Result<Vec<_>>>()?;
        state.default_value = Some(values.clone());
        Ok(Value::List(values))
    }

    fn encode(&self, value: &Value, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let mut state = self.state.lock();
        state.freeze()?;

        let values = value.as_list().ok_or_else(|| value.mismatch("list"))?;
        if values.len() != state.members.len() {
            return Err(CodecError::length(
                "value",
                format!(
                    "{} values for {} members",
                    values.len(),
                    state.members.len()
                ),
            ));
        }

        check_bounds(buffer.len(), offset, state.byte_length()?)?;

        let mut written = 0;
        for (index, (member, item)) in state.members.iter().zip(values).enumerate() {
            let n = member.encode(item, buffer, offset + written)?;
            trace!(index, offset = offset + written, bytes = n, "member encoded");
            written += n;
        }
        Ok(written)
    }

    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        let mut state = self.state.lock();
        state.freeze()?;

        check_bounds(buffer.len(), offset, state.byte_length()?)?;

        let mut values = Vec::with_capacity(state.members.len());
        let mut position = offset;
        for (index, member) in state.members.iter().enumerate() {
            values.push(member.decode(buffer, position)?);
            let n = member.byte_length()?;
            trace!(index, offset = position, bytes = n, "member decoded");
            position += n;
        }
        Ok(Value::List(values))
    }

    fn clone_box(&self) -> Codec {
        Box::new(self.clone())
    }

    fn descriptor(&self) -> Result<DataTypeDescriptor> {
        let state = self.state.lock();
        if state.phase == Phase::Unset {
            return Err(CodecError::PropertyNotSet("members"));
        }

        let members = state
            .members
            .iter()
            .map(|member| member.descriptor())
            .collect::<Result<Vec<_>>>()?;
        Ok(DataTypeDescriptor::Structure { members })
    }
}
