//! Core declarations: identifiers, identifier sets and state types.
//!
//! This module contains everything a state author touches:
//! - `StateId` and `StateSet`, the identifier set primitive
//! - `DeclaredState` and `Enter`, the state declaration traits
//! - `StateHistory`, the transition log kept by machines

mod history;
mod id;
mod set;
mod state;

pub use history::{StateHistory, TransitionKind, TransitionRecord};
pub use id::StateId;
pub use set::StateSet;
pub use state::{DeclaredState, Enter, Entries, Exits, StateDescriptor, StateValue};

pub(crate) use state::EntryFn;
