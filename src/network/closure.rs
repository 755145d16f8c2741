//! Reachability closure over declared exits.

use crate::builder::BuildError;
use crate::core::{StateDescriptor, StateId, StateSet};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// States reachable from an initial state, with their descriptors.
pub(crate) struct Closure {
    pub states: StateSet,
    pub descriptors: HashMap<StateId, StateDescriptor>,
}

/// Breadth-first closure of the "declares an exit to" relation.
///
/// States appear in first-discovery order; exits are queued in declaration
/// order. Each state is described exactly once.
pub(crate) fn close(initial: StateId) -> Result<Closure, BuildError> {
    let mut order = Vec::new();
    let mut descriptors = HashMap::new();
    let mut seen = HashSet::from([initial]);
    let mut queue = VecDeque::from([initial]);

    while let Some(id) = queue.pop_front() {
        if descriptors.contains_key(&id) {
            continue;
        }

        let descriptor = id.describe()?;
        debug!(
            state = %id,
            exits = descriptor.exits().len(),
            "Discovered state"
        );

        for exit in descriptor.exits() {
            if seen.insert(exit) {
                queue.push_back(exit);
            }
        }

        order.push(id);
        descriptors.insert(id, descriptor);
    }

    debug!(initial = %initial, states = order.len(), "Closed state network");

    Ok(Closure {
        states: StateSet::from_unique(order),
        descriptors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Halted, Idle, Lounging, Napping, Running, Stutter, Walking};

    #[test]
    fn cycle_closes_to_all_three_states() {
        let closure = close(StateId::of::<Running>()).unwrap();

        assert_eq!(
            closure.states.as_slice(),
            &[
                StateId::of::<Running>(),
                StateId::of::<Walking>(),
                StateId::of::<Idle>(),
            ]
        );
        assert_eq!(closure.descriptors.len(), 3);
    }

    #[test]
    fn closure_is_independent_of_start_as_a_set() {
        let from_idle = close(StateId::of::<Idle>()).unwrap();
        let from_running = close(StateId::of::<Running>()).unwrap();

        assert_eq!(from_idle.states, from_running.states);
        assert_eq!(from_idle.states.first(), Some(StateId::of::<Idle>()));
    }

    #[test]
    fn state_without_exits_is_singleton() {
        let closure = close(StateId::of::<Halted>()).unwrap();

        assert_eq!(closure.states.as_slice(), &[StateId::of::<Halted>()]);
    }

    #[test]
    fn closure_ignores_missing_entries() {
        let closure = close(StateId::of::<Lounging>()).unwrap();

        assert_eq!(
            closure.states.as_slice(),
            &[StateId::of::<Lounging>(), StateId::of::<Napping>()]
        );
    }

    #[test]
    fn duplicate_exit_aborts_closure() {
        let result = close(StateId::of::<Stutter>());

        assert!(matches!(result, Err(BuildError::DuplicateExit { .. })));
    }
}
