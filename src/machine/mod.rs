//! Runtime state container.
//!
//! [`InferredStateMachine`] holds one live state of a verified network and
//! dispatches transitions on whichever state is currently active.

mod container;
mod error;

pub use container::InferredStateMachine;
pub use error::TransitionError;
