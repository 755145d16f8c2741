//! Locomotion State Machine
//!
//! This example walks a character between Idle, Walking and Running.
//!
//! Key concepts:
//! - States declare their exits and how they are entered
//! - The network of reachable states is inferred from the initial state
//! - Illegal transitions fail without touching the live state
//!
//! Run with: RUST_LOG=statenet=debug cargo run --example locomotion

use statenet::core::Enter;
use statenet::{declare_state, InferredStateMachine, StateValue};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
struct Idle;

#[derive(Debug)]
struct Walking {
    pace: u32,
}

#[derive(Debug)]
struct Running {
    pace: u32,
}

impl Enter<Walking> for Idle {
    fn enter(_from: &mut Walking) -> Self {
        Idle
    }
}

impl Enter<Idle> for Walking {
    fn enter(_from: &mut Idle) -> Self {
        Walking { pace: 4 }
    }
}

impl Enter<Running> for Walking {
    fn enter(from: &mut Running) -> Self {
        Walking {
            pace: from.pace / 2,
        }
    }
}

impl Enter<Walking> for Running {
    fn enter(from: &mut Walking) -> Self {
        Running {
            pace: from.pace * 2,
        }
    }
}

declare_state! {
    Idle { exits: [Walking], enter_from: [Walking] }
    Walking { exits: [Idle, Running], enter_from: [Idle, Running] }
    Running { exits: [Walking], enter_from: [Walking] }
}

fn describe(state: &dyn StateValue) -> String {
    if let Some(walking) = state.downcast_ref::<Walking>() {
        format!("walking at pace {}", walking.pace)
    } else if let Some(running) = state.downcast_ref::<Running>() {
        format!("running at pace {}", running.pace)
    } else {
        state.state_name().to_lowercase()
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Locomotion State Machine Example ===\n");

    let mut machine = InferredStateMachine::builder()
        .record_history(true)
        .build(Running { pace: 12 })
        .unwrap();

    println!("Network: {:?}", machine.network().states());
    println!("Verified: {}", machine.is_verified());
    println!("Now {}", machine.visit(describe));

    println!("\nTrying to stop while running...");
    match machine.transition_to::<Idle>() {
        Ok(()) => println!("Stopped"),
        Err(err) => println!("Rejected: {}", err),
    }
    println!("Still {}", machine.visit(describe));

    machine.transition_to::<Walking>().unwrap();
    println!("\nSlowed down, now {}", machine.visit(describe));

    if machine.can_transition_to::<Idle>() {
        machine.transition_to::<Idle>().unwrap();
    }
    println!("Now {}", machine.visit(describe));

    println!("\nPath taken:");
    for state in machine.history().get_path() {
        println!("  {}", state);
    }

    println!("\n=== Example Complete ===");
}
