//! Definition-time errors for state sets, networks and machines.

use crate::core::StateId;
use crate::network::MissingEntry;
use thiserror::Error;

/// Errors raised while declaring states or assembling a machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("State `{duplicate}` appears more than once in a state set")]
    DuplicateMember { duplicate: StateId },

    #[error("State `{state}` lists exit `{duplicate}` more than once")]
    DuplicateExit { state: StateId, duplicate: StateId },

    #[error(
        "State network rooted at `{initial}` is unverified: {} declared exit(s) lack an entry operation",
        .missing.len()
    )]
    Unverified {
        initial: StateId,
        missing: Vec<MissingEntry>,
    },

    #[error("Initial state `{found}` does not match the network's initial state `{expected}`")]
    InitialMismatch { expected: StateId, found: StateId },
}
