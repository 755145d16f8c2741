//! Builder for constructing configured state machines.

use crate::builder::error::BuildError;
use crate::core::{DeclaredState, StateId};
use crate::machine::InferredStateMachine;
use crate::network::StateNetwork;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Records kept by a machine's history unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Settings applied when a machine is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Refuse to build over an unverified network.
    pub strict: bool,

    /// Record every transition in the machine's history.
    pub record_history: bool,

    /// Maximum retained history records; `None` keeps all of them.
    pub history_capacity: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            strict: false,
            record_history: false,
            history_capacity: Some(DEFAULT_HISTORY_CAPACITY),
        }
    }
}

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```
/// use statenet::builder::MachineBuilder;
/// use statenet::core::Enter;
/// use statenet::declare_state;
///
/// #[derive(Debug)]
/// struct Queued;
/// #[derive(Debug)]
/// struct Sent;
///
/// impl Enter<Queued> for Sent {
///     fn enter(_from: &mut Queued) -> Self { Sent }
/// }
///
/// declare_state! {
///     Queued { exits: [Sent] }
///     Sent { exits: [], enter_from: [Queued] }
/// }
///
/// let mut machine = MachineBuilder::new()
///     .strict(true)
///     .record_history(true)
///     .build(Queued)
///     .unwrap();
///
/// machine.transition_to::<Sent>().unwrap();
/// assert_eq!(machine.history().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MachineBuilder {
    network: Option<Arc<StateNetwork>>,
    config: MachineConfig,
}

impl MachineBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse a pre-built network instead of building one.
    pub fn network(mut self, network: Arc<StateNetwork>) -> Self {
        self.network = Some(network);
        self
    }

    /// Refuse unverified networks.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Record transitions in the machine's history.
    pub fn record_history(mut self, record: bool) -> Self {
        self.config.record_history = record;
        self
    }

    /// Bound the history to `capacity` records.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = Some(capacity);
        self
    }

    /// Keep every history record.
    pub fn unbounded_history(mut self) -> Self {
        self.config.history_capacity = None;
        self
    }

    /// Replace all settings at once.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the machine, starting in `initial`.
    ///
    /// Builds the network reachable from `T` unless one was supplied.
    pub fn build<T: DeclaredState>(self, initial: T) -> Result<InferredStateMachine, BuildError> {
        let found = StateId::of::<T>();
        let network = match self.network {
            Some(network) if network.initial() != found => {
                return Err(BuildError::InitialMismatch {
                    expected: network.initial(),
                    found,
                });
            }
            Some(network) => network,
            None => Arc::new(StateNetwork::build::<T>()?),
        };

        if self.config.strict && !network.is_verified() {
            return Err(BuildError::Unverified {
                initial: network.initial(),
                missing: network.missing_entries().to_vec(),
            });
        }

        Ok(InferredStateMachine::from_parts(
            network,
            Box::new(initial),
            self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionKind;
    use crate::fixtures::{Halted, Idle, Lounging, Napping, Running, Stutter, Walking};

    #[test]
    fn default_config_is_lenient_without_history() {
        let config = MachineConfig::default();

        assert!(!config.strict);
        assert!(!config.record_history);
        assert_eq!(config.history_capacity, Some(DEFAULT_HISTORY_CAPACITY));
    }

    #[test]
    fn builder_builds_network_for_initial_state() {
        let machine = MachineBuilder::new().build(Idle).unwrap();

        assert!(machine.is_active::<Idle>());
        assert_eq!(machine.network().initial(), StateId::of::<Idle>());
        assert_eq!(machine.network().len(), 3);
    }

    #[test]
    fn strict_builder_rejects_unverified_network() {
        let result = MachineBuilder::new().strict(true).build(Lounging);

        match result {
            Err(BuildError::Unverified { initial, missing }) => {
                assert_eq!(initial, StateId::of::<Lounging>());
                assert_eq!(missing.len(), 1);
                assert_eq!(missing[0].from, StateId::of::<Napping>());
            }
            other => panic!("Expected Unverified, got {other:?}"),
        }
    }

    #[test]
    fn lenient_builder_accepts_unverified_network() {
        let machine = MachineBuilder::new().build(Lounging).unwrap();
        assert!(!machine.is_verified());
    }

    #[test]
    fn builder_propagates_duplicate_exits() {
        let result = MachineBuilder::new().build(Stutter);
        assert!(matches!(result, Err(BuildError::DuplicateExit { .. })));
    }

    #[test]
    fn shared_network_must_match_initial_state() {
        let network = Arc::new(StateNetwork::build::<Running>().unwrap());

        let result = MachineBuilder::new().network(Arc::clone(&network)).build(Idle);
        assert!(matches!(
            result,
            Err(BuildError::InitialMismatch { expected, found })
                if expected == StateId::of::<Running>() && found == StateId::of::<Idle>()
        ));

        let machine = MachineBuilder::new()
            .network(Arc::clone(&network))
            .build(Running::default())
            .unwrap();
        assert!(Arc::ptr_eq(machine.network(), &network));
    }

    #[test]
    fn history_records_entered_and_forced() {
        let mut machine = MachineBuilder::new()
            .record_history(true)
            .build(Running::default())
            .unwrap();

        machine.transition_to::<Walking>().unwrap();
        machine.force_transition(Halted);

        let kinds: Vec<TransitionKind> = machine.history().records().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TransitionKind::Entered, TransitionKind::Forced]);
        assert_eq!(
            machine.history().get_path(),
            vec![
                StateId::of::<Running>(),
                StateId::of::<Walking>(),
                StateId::of::<Halted>(),
            ]
        );
    }

    #[test]
    fn history_capacity_is_respected() {
        let mut machine = MachineBuilder::new()
            .record_history(true)
            .history_capacity(2)
            .build(Running::default())
            .unwrap();

        machine.transition_to::<Walking>().unwrap();
        machine.transition_to::<Idle>().unwrap();
        machine.transition_to::<Walking>().unwrap();

        assert_eq!(machine.history().len(), 2);
        assert_eq!(machine.history().capacity(), Some(2));
    }

    #[test]
    fn maximum_history_capacity_builds() {
        let mut machine = MachineBuilder::new()
            .history_capacity(usize::MAX)
            .build(Running::default())
            .unwrap();
        assert!(machine.history().is_empty());

        let mut recording = MachineBuilder::new()
            .record_history(true)
            .history_capacity(usize::MAX)
            .build(Running::default())
            .unwrap();
        machine.transition_to::<Walking>().unwrap();
        recording.transition_to::<Walking>().unwrap();

        assert!(machine.history().is_empty());
        assert_eq!(recording.history().len(), 1);
    }

    #[test]
    fn deserialized_maximum_capacity_builds() {
        let json = format!(
            r#"{{"strict":false,"record_history":true,"history_capacity":{}}}"#,
            usize::MAX
        );
        let config: MachineConfig = serde_json::from_str(&json).unwrap();

        let machine = MachineBuilder::new().config(config).build(Idle).unwrap();
        assert_eq!(machine.history().capacity(), Some(usize::MAX));
    }

    #[test]
    fn unbounded_history_keeps_everything() {
        let mut machine = MachineBuilder::new()
            .record_history(true)
            .unbounded_history()
            .build(Idle)
            .unwrap();

        for _ in 0..100 {
            machine.transition_to::<Walking>().unwrap();
            machine.transition_to::<Idle>().unwrap();
        }

        assert_eq!(machine.history().len(), 200);
        assert_eq!(machine.history().capacity(), None);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MachineConfig {
            strict: true,
            record_history: true,
            history_capacity: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let decoded: MachineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(MachineBuilder::new().config(config.clone()).config, config);
    }
}
