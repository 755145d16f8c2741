//! Declared states and their entry operations.
//!
//! A state is a payload type implementing [`DeclaredState`]. It lists the
//! states it may transition into (its exits) and registers one entry
//! operation per predecessor that may transition into it. Entry operations
//! take the predecessor by exclusive reference and build the new value.

use crate::builder::BuildError;
use crate::core::id::{short_type_name, StateId};
use crate::core::set::StateSet;
use std::any::Any;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

/// Raw declared exit list, usually produced by [`exits!`](crate::exits).
pub type Exits = Vec<StateId>;

/// Trait for state payload types.
///
/// # Example
///
/// ```rust
/// use statenet::core::{DeclaredState, Enter, Entries, Exits};
/// use statenet::exits;
///
/// #[derive(Debug, Default)]
/// struct Locked;
///
/// #[derive(Debug, Default)]
/// struct Unlocked {
///     opened: u32,
/// }
///
/// impl Enter<Unlocked> for Locked {
///     fn enter(_from: &mut Unlocked) -> Self {
///         Locked
///     }
/// }
///
/// impl DeclaredState for Locked {
///     fn exits() -> Exits {
///         exits![Unlocked]
///     }
///
///     fn entries(entries: &mut Entries<Self>) {
///         entries.from::<Unlocked>();
///     }
/// }
///
/// impl DeclaredState for Unlocked {
///     fn exits() -> Exits {
///         exits![Locked]
///     }
///
///     fn entries(entries: &mut Entries<Self>) {
///         entries.with::<Locked, _>(|_locked| Unlocked { opened: 0 });
///     }
/// }
/// ```
pub trait DeclaredState: Any + Send + Debug + Sized {
    /// States this state may transition into.
    fn exits() -> Exits;

    /// Register entry operations keyed by predecessor.
    ///
    /// Default implementation registers none.
    fn entries(_entries: &mut Entries<Self>) {}

    /// Display name for diagnostics.
    ///
    /// Default implementation returns the type name without its module path.
    fn name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Typed entry operation from predecessor `P`.
///
/// Register an implementation with [`Entries::from`].
pub trait Enter<P>: Sized {
    fn enter(from: &mut P) -> Self;
}

/// Type-erased entry operation.
///
/// Returns `None` if the argument is not the predecessor it was registered for.
pub(crate) type EntryFn =
    Arc<dyn Fn(&mut dyn StateValue) -> Option<Box<dyn StateValue>> + Send + Sync>;

/// Registry of entry operations into the state `T`.
pub struct Entries<T> {
    table: Vec<(StateId, EntryFn)>,
    _target: PhantomData<fn() -> T>,
}

impl<T: DeclaredState> Entries<T> {
    fn new() -> Self {
        Self {
            table: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Register `T`'s [`Enter<P>`] implementation as the entry from `P`.
    pub fn from<P: DeclaredState>(&mut self) -> &mut Self
    where
        T: Enter<P>,
    {
        self.with::<P, _>(<T as Enter<P>>::enter)
    }

    /// Register a function as the entry from `P`.
    ///
    /// Registering a second entry for the same predecessor replaces the first.
    pub fn with<P, F>(&mut self, entry: F) -> &mut Self
    where
        P: DeclaredState,
        F: Fn(&mut P) -> T + Send + Sync + 'static,
    {
        let predecessor = StateId::of::<P>();
        let erased: EntryFn = Arc::new(move |from: &mut dyn StateValue| {
            from.downcast_mut::<P>()
                .map(|from| Box::new(entry(from)) as Box<dyn StateValue>)
        });

        match self.table.iter_mut().find(|(id, _)| *id == predecessor) {
            Some(slot) => slot.1 = erased,
            None => self.table.push((predecessor, erased)),
        }
        self
    }
}

/// Object-safe view of a live state value.
///
/// Implemented for every [`DeclaredState`]. The runtime container stores its
/// active state as a `Box<dyn StateValue>` and hands it to visitors.
pub trait StateValue: Any + Send + Debug + 'static {
    fn state_id(&self) -> StateId;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: DeclaredState> StateValue for T {
    fn state_id(&self) -> StateId {
        StateId::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn StateValue {
    pub fn state_name(&self) -> &'static str {
        self.state_id().name()
    }

    pub fn is<T: DeclaredState>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: DeclaredState>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: DeclaredState>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Materialized declarations of one state.
///
/// Holds the state's identifier, its exits as a [`StateSet`], and its entry
/// table keyed by predecessor.
#[derive(Clone)]
pub struct StateDescriptor {
    id: StateId,
    exits: StateSet,
    entries: Vec<(StateId, EntryFn)>,
}

impl StateDescriptor {
    /// Describe the state `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateExit`] if `T::exits()` repeats an id.
    pub fn describe<T: DeclaredState>() -> Result<Self, BuildError> {
        let id = StateId::of::<T>();
        let exits = StateSet::try_from_ids(T::exits()).map_err(|err| match err {
            BuildError::DuplicateMember { duplicate } => BuildError::DuplicateExit {
                state: id,
                duplicate,
            },
            other => other,
        })?;

        let mut entries = Entries::<T>::new();
        T::entries(&mut entries);

        Ok(Self {
            id,
            exits,
            entries: entries.table,
        })
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// Declared exits.
    pub fn exits(&self) -> &StateSet {
        &self.exits
    }

    /// Whether an entry operation from `predecessor` is registered.
    pub fn has_entry_from(&self, predecessor: StateId) -> bool {
        self.entries.iter().any(|(id, _)| *id == predecessor)
    }

    /// Predecessors with a registered entry operation, in registration order.
    pub fn predecessors(&self) -> StateSet {
        StateSet::from_unique(self.entries.iter().map(|(id, _)| *id).collect())
    }

    pub(crate) fn entry_from(&self, predecessor: StateId) -> Option<&EntryFn> {
        self.entries
            .iter()
            .find(|(id, _)| *id == predecessor)
            .map(|(_, entry)| entry)
    }
}

impl Debug for StateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("id", &self.id)
            .field("exits", &self.exits)
            .field("entries", &self.predecessors())
            .finish()
    }
}
