//! Builder API and macros for declaring states and assembling machines.
//!
//! This module provides the fluent [`MachineBuilder`], the definition-time
//! [`BuildError`], and the `exits!`, `state_set!` and `declare_state!`
//! macros that keep state declarations short.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::{MachineBuilder, MachineConfig, DEFAULT_HISTORY_CAPACITY};
