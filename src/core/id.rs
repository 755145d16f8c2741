//! Opaque identifiers naming state payload types.

use crate::builder::BuildError;
use crate::core::state::{DeclaredState, StateDescriptor};
use serde::{Serialize, Serializer};
use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of a declared state.
///
/// A `StateId` names one state payload type. Equality, ordering and hashing
/// only look at the payload's [`TypeId`], so two identifiers are equal iff
/// they name the same state. The identifier also remembers how to describe
/// its state, which lets the network builder walk from an exit identifier to
/// that state's own declarations.
///
/// # Example
///
/// ```rust
/// use statenet::core::{DeclaredState, Exits, StateId};
/// use statenet::exits;
///
/// #[derive(Debug)]
/// struct Parked;
///
/// impl DeclaredState for Parked {
///     fn exits() -> Exits {
///         exits![]
///     }
/// }
///
/// let id = StateId::of::<Parked>();
/// assert_eq!(id, StateId::of::<Parked>());
/// assert_eq!(id.name(), "Parked");
/// ```
#[derive(Clone, Copy)]
pub struct StateId {
    type_id: TypeId,
    name: &'static str,
    describe: fn() -> Result<StateDescriptor, BuildError>,
}

impl StateId {
    /// Identifier of the state `T`.
    pub fn of<T: DeclaredState>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::name(),
            describe: StateDescriptor::describe::<T>,
        }
    }

    /// Display name of the state.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `TypeId` of the state's payload type.
    pub fn payload_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Materialize the descriptor of the named state.
    ///
    /// Fails if the state's declared exit list repeats an identifier.
    pub fn describe(&self) -> Result<StateDescriptor, BuildError> {
        (self.describe)()
    }
}

impl PartialEq for StateId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for StateId {}

impl Hash for StateId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl PartialOrd for StateId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StateId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_id.cmp(&other.type_id)
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateId").field(&self.name).finish()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for StateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Last path segment of a type name; generic types keep their full name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
