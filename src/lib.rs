//! Statenet: inferred state machines over declared state graphs
//!
//! Each state is a Rust type that declares which states it may transition
//! into and how it is entered from each predecessor. From an initial state,
//! Statenet computes the closure of reachable states once, verifies that
//! every declared exit is backed by an entry operation, and hands out a
//! runtime container that holds exactly one live state at a time.
//!
//! # Core Concepts
//!
//! - **StateSet**: Immutable set algebra over state identifiers
//! - **DeclaredState**: Exits and entry operations of one state
//! - **StateNetwork**: Reachability closure and verification, computed once
//! - **InferredStateMachine**: Tagged union with checked transitions
//!
//! # Example
//!
//! ```rust
//! use statenet::core::Enter;
//! use statenet::{declare_state, InferredStateMachine, StateNetwork};
//!
//! #[derive(Debug, Default)]
//! struct Idle;
//!
//! #[derive(Debug, Default)]
//! struct Walking;
//!
//! #[derive(Debug, Default)]
//! struct Running;
//!
//! impl Enter<Walking> for Idle {
//!     fn enter(_from: &mut Walking) -> Self { Idle }
//! }
//!
//! impl Enter<Idle> for Walking {
//!     fn enter(_from: &mut Idle) -> Self { Walking }
//! }
//!
//! impl Enter<Running> for Walking {
//!     fn enter(_from: &mut Running) -> Self { Walking }
//! }
//!
//! impl Enter<Walking> for Running {
//!     fn enter(_from: &mut Walking) -> Self { Running }
//! }
//!
//! declare_state! {
//!     Idle { exits: [Walking], enter_from: [Walking] }
//!     Walking { exits: [Idle, Running], enter_from: [Idle, Running] }
//!     Running { exits: [Walking], enter_from: [Walking] }
//! }
//!
//! assert!(StateNetwork::build::<Running>().unwrap().is_verified());
//!
//! let mut machine = InferredStateMachine::new(Running).unwrap();
//! assert!(!machine.can_transition_to::<Idle>());
//!
//! machine.transition_to::<Walking>().unwrap();
//! machine.transition_to::<Idle>().unwrap();
//! assert!(machine.is_active::<Idle>());
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod network;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder, MachineConfig};
pub use crate::core::{DeclaredState, Enter, Entries, Exits, StateId, StateSet, StateValue};
pub use crate::machine::{InferredStateMachine, TransitionError};
pub use crate::network::{EdgeStatus, MissingEntry, NetworkReport, StateNetwork};
