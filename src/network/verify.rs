//! Cross-check of declared exits against registered entry operations.
//!
//! Every (state, declared exit) pair is checked and all failures are
//! accumulated with stillwater's `Validation`, so a broken network reports
//! every missing entry operation at once.

use crate::core::{StateDescriptor, StateId, StateSet};
use serde::Serialize;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A declared exit whose target has no entry operation from the source.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize)]
#[error("`{to}` does not implement an entry from `{from}`")]
pub struct MissingEntry {
    pub from: StateId,
    pub to: StateId,
}

/// Outcome of verifying a network.
pub type Verification = Validation<(), NonEmptyVec<MissingEntry>>;

/// Check one declared edge.
fn check_edge(
    source: &StateDescriptor,
    target: Option<&StateDescriptor>,
    to: StateId,
) -> Verification {
    let from = source.id();
    match target {
        Some(target) if target.has_entry_from(from) => Validation::success(()),
        _ => Validation::fail(MissingEntry { from, to }),
    }
}

/// Verify every declared exit of every state in `states`.
pub(crate) fn verify(
    states: &StateSet,
    descriptors: &HashMap<StateId, StateDescriptor>,
) -> Verification {
    let checks: Vec<Verification> = states
        .iter()
        .filter_map(|id| descriptors.get(&id))
        .flat_map(|source| {
            source
                .exits()
                .iter()
                .map(move |to| check_edge(source, descriptors.get(&to), to))
        })
        .collect();

    if checks.is_empty() {
        return Validation::success(());
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a verification outcome into the list of missing entries.
pub(crate) fn missing_entries(verification: &Verification) -> Vec<MissingEntry> {
    match verification {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().copied().collect(),
    }
}
