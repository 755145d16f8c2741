//! Network Report
//!
//! This example inspects a network before any machine exists. The door
//! below forgets to say how it is entered from `Locked`, so the network
//! builds but does not verify.
//!
//! Run with: cargo run --example network_report

use statenet::core::{DeclaredState, Entries, Exits};
use statenet::{exits, EdgeStatus, MachineBuilder, StateNetwork};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
struct Open;

#[derive(Debug)]
struct Closed;

#[derive(Debug)]
struct Locked {
    code: u16,
}

impl DeclaredState for Open {
    fn exits() -> Exits {
        exits![Closed]
    }

    fn entries(entries: &mut Entries<Self>) {
        entries.with::<Closed, _>(|_| Open);
    }
}

impl DeclaredState for Closed {
    fn exits() -> Exits {
        exits![Open, Locked]
    }

    fn entries(entries: &mut Entries<Self>) {
        entries.with::<Open, _>(|_| Closed);
    }
}

impl DeclaredState for Locked {
    fn exits() -> Exits {
        exits![Closed]
    }

    fn entries(entries: &mut Entries<Self>) {
        entries.with::<Closed, _>(|_| Locked { code: 1234 });
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Network Report Example ===\n");

    let network = StateNetwork::build::<Open>().unwrap();

    println!("Edges:");
    for (from, to, status) in network.edges() {
        let marker = if status == EdgeStatus::Ready { "ok" } else { "!!" };
        println!("  [{}] {} -> {} ({})", marker, from, to, status);
    }

    for missing in network.missing_entries() {
        println!("\nMissing: {}", missing);
    }

    println!("\nJSON report:");
    println!("{}", network.report().to_json().unwrap());

    println!("\nGraphviz:");
    println!("{}", network.to_dot());

    println!("\nStrict build:");
    match MachineBuilder::new().strict(true).build(Open) {
        Ok(_) => println!("  accepted"),
        Err(err) => println!("  rejected: {}", err),
    }

    println!("\nLenient build:");
    let mut machine = MachineBuilder::new().build(Open).unwrap();
    machine.transition_to::<Closed>().unwrap();
    machine.transition_to::<Locked>().unwrap();
    if let Some(locked) = machine.get::<Locked>() {
        println!("  locked with code {}", locked.code);
    }
    if let Err(err) = machine.transition_to::<Closed>() {
        println!("  cannot unlock: {}", err);
    }

    println!("\n=== Example Complete ===");
}
