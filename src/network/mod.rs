//! Definition-time analysis of declared state graphs.
//!
//! A [`StateNetwork`] is built once from an initial state. Building computes
//! the closure of declared exits and verifies every declared edge against
//! the registered entry operations. The result is immutable and can be
//! shared across threads behind an `Arc`.

pub(crate) mod closure;
mod report;
mod verify;

pub use report::{EdgeReport, NetworkReport};
pub use verify::{MissingEntry, Verification};

use crate::builder::BuildError;
use crate::core::{DeclaredState, EntryFn, StateDescriptor, StateId, StateSet};
use crate::machine::TransitionError;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Status of a (source, target) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatus {
    /// Declared exit with a matching entry operation.
    Ready,
    /// Declared exit whose target has no entry from the source.
    MissingEntry,
    /// Target is not among the source's declared exits.
    NotAnExit,
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ready => "ready",
            Self::MissingEntry => "missing entry",
            Self::NotAnExit => "not an exit",
        })
    }
}

/// Closure of the declared-exit relation from one initial state.
///
/// # Example
///
/// ```rust
/// use statenet::core::{Enter, StateId};
/// use statenet::declare_state;
/// use statenet::network::StateNetwork;
///
/// #[derive(Debug)]
/// struct Off;
/// #[derive(Debug)]
/// struct On;
///
/// impl Enter<Off> for On {
///     fn enter(_from: &mut Off) -> Self { On }
/// }
///
/// declare_state! {
///     Off { exits: [On] }
///     On { exits: [Off], enter_from: [Off] }
/// }
///
/// let network = StateNetwork::build::<Off>().unwrap();
/// assert_eq!(network.len(), 2);
///
/// // Off never registered an entry from On.
/// assert!(!network.is_verified());
/// assert_eq!(network.missing_entries()[0].to, StateId::of::<Off>());
/// ```
pub struct StateNetwork {
    initial: StateId,
    states: StateSet,
    descriptors: HashMap<StateId, StateDescriptor>,
    missing: Vec<MissingEntry>,
}

impl StateNetwork {
    /// Build the network reachable from `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateExit`] if any reachable state lists an
    /// exit twice.
    pub fn build<T: DeclaredState>() -> Result<Self, BuildError> {
        Self::build_from(StateId::of::<T>())
    }

    /// Build the network reachable from `initial`.
    pub fn build_from(initial: StateId) -> Result<Self, BuildError> {
        let closure = closure::close(initial)?;
        let verification = verify::verify(&closure.states, &closure.descriptors);
        let missing = verify::missing_entries(&verification);

        for edge in &missing {
            warn!(from = %edge.from, to = %edge.to, "Declared exit has no entry operation");
        }
        debug!(
            initial = %initial,
            states = closure.states.len(),
            verified = missing.is_empty(),
            "Built state network"
        );

        Ok(Self {
            initial,
            states: closure.states,
            descriptors: closure.descriptors,
            missing,
        })
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Member states in first-discovery order.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.descriptors.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a built network contains at least its initial state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn descriptor(&self, id: StateId) -> Option<&StateDescriptor> {
        self.descriptors.get(&id)
    }

    /// Whether every declared exit has a matching entry operation.
    pub fn is_verified(&self) -> bool {
        self.missing.is_empty()
    }

    /// Declared exits lacking an entry operation, in discovery order.
    pub fn missing_entries(&self) -> &[MissingEntry] {
        &self.missing
    }

    /// Recompute verification from the declarations.
    pub fn verify(&self) -> Verification {
        verify::verify(&self.states, &self.descriptors)
    }

    /// Status of the edge `from -> to`.
    ///
    /// States outside the network are described on demand.
    pub fn edge_status(&self, from: StateId, to: StateId) -> EdgeStatus {
        match self.entry(from, to) {
            Ok(_) => EdgeStatus::Ready,
            Err(TransitionError::MissingEntry { .. }) => EdgeStatus::MissingEntry,
            Err(TransitionError::NotAnExit { .. }) => EdgeStatus::NotAnExit,
        }
    }

    /// Every declared edge of every member, with its status.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, StateId, EdgeStatus)> + '_ {
        self.states
            .iter()
            .filter_map(|id| self.descriptors.get(&id))
            .flat_map(move |source| {
                source
                    .exits()
                    .iter()
                    .map(move |to| (source.id(), to, self.edge_status(source.id(), to)))
            })
    }

    /// Entry operation for `from -> to`, or why there is none.
    pub(crate) fn entry(&self, from: StateId, to: StateId) -> Result<EntryFn, TransitionError> {
        let declares_exit = self
            .resolve(from)
            .is_some_and(|source| source.exits().contains(to));
        if !declares_exit {
            return Err(TransitionError::NotAnExit { from, to });
        }

        self.resolve(to)
            .and_then(|target| target.entry_from(from).cloned())
            .ok_or(TransitionError::MissingEntry { from, to })
    }

    /// Descriptor of a member, or a fresh one for states outside the network.
    fn resolve(&self, id: StateId) -> Option<Cow<'_, StateDescriptor>> {
        if let Some(descriptor) = self.descriptors.get(&id) {
            return Some(Cow::Borrowed(descriptor));
        }
        match id.describe() {
            Ok(descriptor) => Some(Cow::Owned(descriptor)),
            Err(err) => {
                warn!(state = %id, error = %err, "Cannot describe state outside network");
                None
            }
        }
    }
}

impl fmt::Debug for StateNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNetwork")
            .field("initial", &self.initial)
            .field("states", &self.states)
            .field("missing", &self.missing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Halted, Idle, Lounging, Napping, Running, Stutter, Walking};

    #[test]
    fn build_computes_closure_and_verifies() {
        let network = StateNetwork::build::<Running>().unwrap();

        assert_eq!(network.initial(), StateId::of::<Running>());
        assert_eq!(network.len(), 3);
        assert!(network.contains(StateId::of::<Idle>()));
        assert!(!network.contains(StateId::of::<Halted>()));
        assert!(network.is_verified());
        assert!(network.verify().is_success());
    }

    #[test]
    fn build_from_terminal_state_is_singleton() {
        let network = StateNetwork::build::<Halted>().unwrap();

        assert_eq!(network.len(), 1);
        assert!(!network.is_empty());
        assert!(network.is_verified());
    }

    #[test]
    fn unverified_network_still_builds() {
        let network = StateNetwork::build::<Lounging>().unwrap();

        assert!(!network.is_verified());
        assert!(network.verify().is_failure());
        assert_eq!(
            network.missing_entries(),
            &[MissingEntry {
                from: StateId::of::<Napping>(),
                to: StateId::of::<Lounging>(),
            }]
        );
    }

    #[test]
    fn build_rejects_duplicate_exits() {
        let result = StateNetwork::build::<Stutter>();

        assert!(matches!(
            result,
            Err(BuildError::DuplicateExit { state, .. }) if state == StateId::of::<Stutter>()
        ));
    }

    #[test]
    fn edge_status_distinguishes_failures() {
        let network = StateNetwork::build::<Lounging>().unwrap();
        let lounging = StateId::of::<Lounging>();
        let napping = StateId::of::<Napping>();

        assert_eq!(network.edge_status(lounging, napping), EdgeStatus::Ready);
        assert_eq!(network.edge_status(napping, lounging), EdgeStatus::MissingEntry);
        assert_eq!(network.edge_status(lounging, lounging), EdgeStatus::NotAnExit);
    }

    #[test]
    fn edge_status_describes_outside_states() {
        let network = StateNetwork::build::<Running>().unwrap();

        assert_eq!(
            network.edge_status(StateId::of::<Lounging>(), StateId::of::<Napping>()),
            EdgeStatus::Ready
        );
        assert_eq!(
            network.edge_status(StateId::of::<Halted>(), StateId::of::<Idle>()),
            EdgeStatus::NotAnExit
        );
    }

    #[test]
    fn edges_lists_every_declared_exit() {
        let network = StateNetwork::build::<Running>().unwrap();
        let edges: Vec<_> = network.edges().collect();

        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|(_, _, status)| *status == EdgeStatus::Ready));
        assert_eq!(
            edges[0],
            (StateId::of::<Running>(), StateId::of::<Walking>(), EdgeStatus::Ready)
        );
    }

    #[test]
    fn network_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StateNetwork>();
    }
}
