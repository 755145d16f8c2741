//! Runtime container holding exactly one live state.

use crate::builder::{BuildError, MachineBuilder, MachineConfig};
use crate::core::{
    DeclaredState, StateHistory, StateId, StateValue, TransitionKind, TransitionRecord,
};
use crate::machine::error::TransitionError;
use crate::network::StateNetwork;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Tagged union over the states of a [`StateNetwork`].
///
/// The machine owns one live state value, tagged with its [`StateId`].
/// Transitions either fully install the new state or leave the original
/// untouched.
///
/// # Example
///
/// ```rust
/// use statenet::core::Enter;
/// use statenet::declare_state;
/// use statenet::machine::InferredStateMachine;
///
/// #[derive(Debug)]
/// struct Off;
/// #[derive(Debug)]
/// struct On { level: u8 }
///
/// impl Enter<Off> for On {
///     fn enter(_from: &mut Off) -> Self { On { level: 1 } }
/// }
///
/// impl Enter<On> for Off {
///     fn enter(_from: &mut On) -> Self { Off }
/// }
///
/// declare_state! {
///     Off { exits: [On], enter_from: [On] }
///     On { exits: [Off], enter_from: [Off] }
/// }
///
/// let mut machine = InferredStateMachine::new(Off).unwrap();
/// assert!(machine.can_transition_to::<On>());
///
/// machine.transition_to::<On>().unwrap();
/// assert!(machine.is_active::<On>());
/// assert_eq!(machine.get::<On>().map(|on| on.level), Some(1));
/// ```
#[derive(Debug)]
pub struct InferredStateMachine {
    network: Arc<StateNetwork>,
    current: StateId,
    state: Box<dyn StateValue>,
    config: MachineConfig,
    history: StateHistory,
}

impl InferredStateMachine {
    /// Build the network reachable from `initial`'s type and start in `initial`.
    pub fn new<T: DeclaredState>(initial: T) -> Result<Self, BuildError> {
        MachineBuilder::new().build(initial)
    }

    /// Start in `initial` over a pre-built network.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InitialMismatch`] if `initial` is not the
    /// network's initial state.
    pub fn with_network<T: DeclaredState>(
        network: Arc<StateNetwork>,
        initial: T,
    ) -> Result<Self, BuildError> {
        MachineBuilder::new().network(network).build(initial)
    }

    /// Fluent builder for configured machines.
    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        network: Arc<StateNetwork>,
        state: Box<dyn StateValue>,
        config: MachineConfig,
    ) -> Self {
        let history = match config.history_capacity {
            Some(capacity) => StateHistory::bounded(capacity),
            None => StateHistory::unbounded(),
        };
        Self {
            network,
            current: state.state_id(),
            state,
            config,
            history,
        }
    }

    /// Identifier of the active state.
    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn is_active<T: DeclaredState>(&self) -> bool {
        self.current == StateId::of::<T>()
    }

    /// Whether `transition_to::<T>()` would succeed from the active state.
    pub fn can_transition_to<T: DeclaredState>(&self) -> bool {
        self.network
            .entry(self.current, StateId::of::<T>())
            .is_ok()
    }

    /// Transition to `T` through the active state's declared exit.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotAnExit`] if the active state does not
    /// list `T` among its exits, and [`TransitionError::MissingEntry`] if it
    /// does but `T` has no entry operation from it. The machine is unchanged
    /// on error.
    pub fn transition_to<T: DeclaredState>(&mut self) -> Result<(), TransitionError> {
        let from = self.current;
        let to = StateId::of::<T>();
        let entry = self.network.entry(from, to)?;
        let next = entry(&mut *self.state).ok_or(TransitionError::MissingEntry { from, to })?;

        self.install(next, TransitionKind::Entered);
        Ok(())
    }

    /// Like [`transition_to`](Self::transition_to), but reports failure as
    /// `false` and leaves the machine unchanged.
    pub fn try_transition_to<T: DeclaredState>(&mut self) -> bool {
        match self.transition_to::<T>() {
            Ok(()) => true,
            Err(err) => {
                trace!(error = %err, "Transition probe rejected");
                false
            }
        }
    }

    /// Install `value` regardless of declared exits.
    ///
    /// The target may lie outside the network; no closure or verification
    /// guarantee covers it.
    pub fn force_transition<T: DeclaredState>(&mut self, value: T) {
        let to = StateId::of::<T>();
        if !self.network.contains(to) {
            warn!(
                from = %self.current,
                to = %to,
                "Forcing transition to a state outside the network"
            );
        }
        self.install(Box::new(value), TransitionKind::Forced);
    }

    /// Run `visitor` on the active state.
    pub fn visit<R>(&self, visitor: impl FnOnce(&dyn StateValue) -> R) -> R {
        visitor(&*self.state)
    }

    /// Run `visitor` on the active state with exclusive access.
    pub fn visit_mut<R>(&mut self, visitor: impl FnOnce(&mut dyn StateValue) -> R) -> R {
        visitor(&mut *self.state)
    }

    /// The active state if it is a `T`.
    pub fn get<T: DeclaredState>(&self) -> Option<&T> {
        self.state.downcast_ref::<T>()
    }

    pub fn get_mut<T: DeclaredState>(&mut self) -> Option<&mut T> {
        self.state.downcast_mut::<T>()
    }

    pub fn network(&self) -> &Arc<StateNetwork> {
        &self.network
    }

    pub fn is_verified(&self) -> bool {
        self.network.is_verified()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    fn install(&mut self, next: Box<dyn StateValue>, kind: TransitionKind) {
        let from = self.current;
        let to = next.state_id();

        self.state = next;
        self.current = to;

        if self.config.record_history {
            self.history.record(TransitionRecord::new(from, to, kind));
        }
        debug!(from = %from, to = %to, kind = ?kind, "Transitioned");
    }
}
