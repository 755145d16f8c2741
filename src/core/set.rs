//! Immutable sets of state identifiers.
//!
//! A [`StateSet`] is an ordered sequence of unique [`StateId`]s. Order only
//! matters for projection and diagnostics; equality is set equality. Every
//! operation returns a new set and leaves the receiver untouched.

use crate::builder::BuildError;
use crate::core::id::StateId;
use serde::Serialize;

/// Ordered set of unique state identifiers.
///
/// # Example
///
/// ```rust
/// use statenet::core::{DeclaredState, Exits, StateId, StateSet};
/// use statenet::exits;
///
/// #[derive(Debug)]
/// struct Open;
/// #[derive(Debug)]
/// struct Closed;
///
/// impl DeclaredState for Open {
///     fn exits() -> Exits { exits![Closed] }
/// }
///
/// impl DeclaredState for Closed {
///     fn exits() -> Exits { exits![Open] }
/// }
///
/// let open = StateId::of::<Open>();
/// let closed = StateId::of::<Closed>();
///
/// let set = StateSet::new().add([open, closed, open]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains_all([open, closed]));
///
/// let set = set.remove([open]);
/// assert!(!set.contains(open));
/// ```
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct StateSet {
    ids: Vec<StateId>,
}

impl StateSet {
    /// The empty set.
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Build a set from a list that must not repeat any identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateMember`] naming the first repeated id.
    pub fn try_from_ids<I>(ids: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut set = Self::new();
        for id in ids {
            if set.contains(id) {
                return Err(BuildError::DuplicateMember { duplicate: id });
            }
            set.ids.push(id);
        }
        Ok(set)
    }

    /// Wrap identifiers already known to be unique.
    pub(crate) fn from_unique(ids: Vec<StateId>) -> Self {
        debug_assert!(Self::try_from_ids(ids.iter().copied()).is_ok());
        Self { ids }
    }

    /// Union with `ids`; ids already present are skipped, new ones are
    /// appended in argument order.
    pub fn add<I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut next = self.clone();
        for id in ids {
            if !next.contains(id) {
                next.ids.push(id);
            }
        }
        next
    }

    /// Set without the named ids. Absent ids are ignored.
    pub fn remove<I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = StateId>,
    {
        let removed: Vec<StateId> = ids.into_iter().collect();
        Self {
            ids: self
                .ids
                .iter()
                .copied()
                .filter(|id| !removed.contains(id))
                .collect(),
        }
    }

    /// Union of `other` and this set: `other`'s members come first.
    pub fn combine(&self, other: &StateSet) -> Self {
        other.add(self.iter())
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.ids.contains(&id)
    }

    /// True if every id is a member. Vacuously true for no ids.
    pub fn contains_all<I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = StateId>,
    {
        ids.into_iter().all(|id| self.contains(id))
    }

    /// True if at least one id is a member. False for no ids.
    pub fn contains_any<I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = StateId>,
    {
        ids.into_iter().any(|id| self.contains(id))
    }

    /// Order-independent set equality.
    pub fn equals(&self, other: &StateSet) -> bool {
        self.len() == other.len() && other.contains_all(self.iter())
    }

    /// Project `prefix` followed by the members, in insertion order, into
    /// any collection.
    ///
    /// ```rust
    /// # use statenet::core::{DeclaredState, Exits, StateId, StateSet};
    /// # use statenet::exits;
    /// # #[derive(Debug)] struct A;
    /// # #[derive(Debug)] struct B;
    /// # impl DeclaredState for A { fn exits() -> Exits { exits![] } }
    /// # impl DeclaredState for B { fn exits() -> Exits { exits![] } }
    /// let set = StateSet::new().add([StateId::of::<B>()]);
    /// let names: Vec<&str> = set
    ///     .apply::<Vec<StateId>, _>([StateId::of::<A>()])
    ///     .iter()
    ///     .map(|id| id.name())
    ///     .collect();
    /// assert_eq!(names, ["A", "B"]);
    /// ```
    pub fn apply<C, P>(&self, prefix: P) -> C
    where
        C: FromIterator<StateId>,
        P: IntoIterator<Item = StateId>,
    {
        prefix.into_iter().chain(self.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn first(&self) -> Option<StateId> {
        self.ids.first().copied()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = StateId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.ids
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for StateSet {}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, StateId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
