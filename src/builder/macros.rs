//! Macros for ergonomic state declaration.

/// Build a declared exit list from state types.
///
/// # Example
///
/// ```
/// use statenet::core::{DeclaredState, Exits};
/// use statenet::exits;
///
/// #[derive(Debug)]
/// struct Green;
/// #[derive(Debug)]
/// struct Red;
///
/// impl DeclaredState for Green {
///     fn exits() -> Exits {
///         exits![Red]
///     }
/// }
///
/// impl DeclaredState for Red {
///     fn exits() -> Exits {
///         exits![]
///     }
/// }
///
/// assert_eq!(Green::exits().len(), 1);
/// ```
#[macro_export]
macro_rules! exits {
    ($($state:ty),* $(,)?) => {
        ::std::vec![$($crate::core::StateId::of::<$state>()),*]
    };
}

/// Build a [`StateSet`](crate::core::StateSet) from state types.
///
/// Expands to [`StateSet::try_from_ids`](crate::core::StateSet::try_from_ids),
/// so a repeated type yields `Err(BuildError::DuplicateMember { .. })`.
#[macro_export]
macro_rules! state_set {
    ($($state:ty),* $(,)?) => {{
        let ids: ::std::vec::Vec<$crate::core::StateId> =
            ::std::vec![$($crate::core::StateId::of::<$state>()),*];
        $crate::core::StateSet::try_from_ids(ids)
    }};
}

/// Generate `DeclaredState` implementations.
///
/// Each state lists its exits and, optionally, the predecessors whose
/// `Enter<P>` implementation should be registered as entry operations.
///
/// # Example
///
/// ```
/// use statenet::core::Enter;
/// use statenet::declare_state;
///
/// #[derive(Debug)]
/// struct Draft;
/// #[derive(Debug)]
/// struct Published;
///
/// impl Enter<Draft> for Published {
///     fn enter(_from: &mut Draft) -> Self {
///         Published
///     }
/// }
///
/// declare_state! {
///     Draft {
///         exits: [Published],
///     }
///     Published {
///         exits: [],
///         enter_from: [Draft],
///     }
/// }
/// ```
#[macro_export]
macro_rules! declare_state {
    ($(
        $state:ty {
            exits: [$($exit:ty),* $(,)?]
            $(, enter_from: [$($from:ty),* $(,)?])?
            $(,)?
        }
    )*) => {
        $(
            impl $crate::core::DeclaredState for $state {
                fn exits() -> $crate::core::Exits {
                    $crate::exits![$($exit),*]
                }

                #[allow(unused_variables)]
                fn entries(entries: &mut $crate::core::Entries<Self>) {
                    $($(
                        entries.from::<$from>();
                    )*)?
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::builder::BuildError;
    use crate::core::{DeclaredState, Enter, StateId};
    use crate::fixtures::{Idle, Running, Walking};

    #[test]
    fn exits_macro_keeps_order() {
        let exits: Vec<StateId> = exits![Running, Idle];
        assert_eq!(exits, vec![StateId::of::<Running>(), StateId::of::<Idle>()]);
    }

    #[test]
    fn exits_macro_accepts_empty_list() {
        let exits: Vec<StateId> = exits![];
        assert!(exits.is_empty());
    }

    #[test]
    fn state_set_macro_builds_set() {
        let set = state_set![Idle, Walking].unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(StateId::of::<Walking>()));
    }

    #[test]
    fn state_set_macro_rejects_duplicates() {
        let result = state_set![Idle, Walking, Idle];
        assert!(matches!(result, Err(BuildError::DuplicateMember { .. })));
    }

    #[test]
    fn declare_state_generates_trait() {
        #[derive(Debug)]
        struct Closed;
        #[derive(Debug)]
        struct Opened;

        impl Enter<Closed> for Opened {
            fn enter(_from: &mut Closed) -> Self {
                Opened
            }
        }

        impl Enter<Opened> for Closed {
            fn enter(_from: &mut Opened) -> Self {
                Closed
            }
        }

        declare_state! {
            Closed {
                exits: [Opened],
                enter_from: [Opened],
            }
            Opened {
                exits: [Closed],
                enter_from: [Closed]
            }
        }

        assert_eq!(Closed::exits(), vec![StateId::of::<Opened>()]);
        assert_eq!(Opened::name(), "Opened");

        let descriptor = StateId::of::<Opened>().describe().unwrap();
        assert!(descriptor.has_entry_from(StateId::of::<Closed>()));
    }

    #[test]
    fn declare_state_works_without_entries() {
        #[derive(Debug)]
        struct Sink;

        declare_state! {
            Sink { exits: [] }
        }

        let descriptor = StateId::of::<Sink>().describe().unwrap();
        assert!(descriptor.exits().is_empty());
        assert!(descriptor.predecessors().is_empty());
    }
}
