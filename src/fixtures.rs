//! Shared state declarations for unit tests.

use crate::core::Enter;

#[derive(Debug, Default)]
pub(crate) struct Idle;

#[derive(Debug, Default)]
pub(crate) struct Walking {
    pub steps: u32,
}

#[derive(Debug, Default)]
pub(crate) struct Running {
    pub speed: u32,
}

/// No exits, no entries.
#[derive(Debug, Default)]
pub(crate) struct Halted;

/// `Napping` declares an exit back to `Lounging`, but `Lounging` registers
/// no entry from `Napping`.
#[derive(Debug, Default)]
pub(crate) struct Lounging;

#[derive(Debug, Default)]
pub(crate) struct Napping;

/// Lists the same exit twice.
#[derive(Debug, Default)]
pub(crate) struct Stutter;

impl Enter<Walking> for Idle {
    fn enter(_from: &mut Walking) -> Self {
        Idle
    }
}

impl Enter<Idle> for Walking {
    fn enter(_from: &mut Idle) -> Self {
        Walking { steps: 0 }
    }
}

impl Enter<Running> for Walking {
    fn enter(from: &mut Running) -> Self {
        Walking { steps: from.speed }
    }
}

impl Enter<Walking> for Running {
    fn enter(from: &mut Walking) -> Self {
        Running { speed: from.steps }
    }
}

impl Enter<Lounging> for Napping {
    fn enter(_from: &mut Lounging) -> Self {
        Napping
    }
}

crate::declare_state! {
    Idle {
        exits: [Walking],
        enter_from: [Walking],
    }
    Walking {
        exits: [Idle, Running],
        enter_from: [Idle, Running],
    }
    Running {
        exits: [Walking],
        enter_from: [Walking],
    }
    Halted {
        exits: [],
    }
    Lounging {
        exits: [Napping],
    }
    Napping {
        exits: [Lounging],
        enter_from: [Lounging],
    }
    Stutter {
        exits: [Idle, Idle],
    }
}
