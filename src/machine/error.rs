//! Runtime transition errors.

use crate::core::StateId;
use thiserror::Error;

/// Why a requested transition cannot run from the active state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("`{to}` is not listed in `{from}` exits")]
    NotAnExit { from: StateId, to: StateId },

    #[error("`{to}` does not implement an entry from `{from}`")]
    MissingEntry { from: StateId, to: StateId },
}

impl TransitionError {
    /// State that was active when the transition was requested.
    pub fn from_state(&self) -> StateId {
        match self {
            Self::NotAnExit { from, .. } | Self::MissingEntry { from, .. } => *from,
        }
    }

    /// Requested target state.
    pub fn to_state(&self) -> StateId {
        match self {
            Self::NotAnExit { to, .. } | Self::MissingEntry { to, .. } => *to,
        }
    }
}
