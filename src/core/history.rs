//! State transition history tracking.
//!
//! Records every transition a machine performs, bounded by an optional
//! capacity. Oldest records are evicted first.

use super::id::StateId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// How a transition was performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Through a declared exit and its entry operation.
    Entered,
    /// Installed directly by `force_transition`.
    Forced,
}

/// Record of a single state transition.
#[derive(Clone, Debug, Serialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    pub kind: TransitionKind,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn new(from: StateId, to: StateId, kind: TransitionKind) -> Self {
        Self {
            from,
            to,
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use statenet::core::{DeclaredState, Exits, StateHistory, StateId, TransitionKind, TransitionRecord};
/// use statenet::exits;
///
/// #[derive(Debug)]
/// struct Start;
/// #[derive(Debug)]
/// struct End;
///
/// impl DeclaredState for Start {
///     fn exits() -> Exits { exits![End] }
/// }
///
/// impl DeclaredState for End {
///     fn exits() -> Exits { exits![] }
/// }
///
/// let mut history = StateHistory::bounded(8);
/// history.record(TransitionRecord::new(
///     StateId::of::<Start>(),
///     StateId::of::<End>(),
///     TransitionKind::Entered,
/// ));
///
/// let path = history.get_path();
/// assert_eq!(path, vec![StateId::of::<Start>(), StateId::of::<End>()]);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct StateHistory {
    records: VecDeque<TransitionRecord>,
    capacity: Option<usize>,
}

impl StateHistory {
    /// History that keeps every record.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// History that keeps at most `capacity` records.
    ///
    /// `capacity` is a limit, not a reservation; storage grows as records
    /// arrive.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == Some(0) {
            return;
        }
        if let Some(capacity) = self.capacity {
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// States traversed: the oldest retained record's `from`, then the `to`
    /// of each record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the first and last retained records.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
