//! Order Lifecycle
//!
//! This demo walks an order through its lifecycle and probes both ends of
//! the chain.
//!
//! Key concepts:
//! - Chain of states declared with `state_enum!` (New -> Processing -> Shipped -> Delivered)
//! - Forward and backward moves, one step at a time
//! - Boundary refusals reported as values, not panics
//! - Transition journal for auditing
//!
//! Run with: RUST_LOG=rewind=debug cargo run --example order_lifecycle

use rewind::prelude::*;
use rewind::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum OrderStatus {
        New,
        Processing,
        Shipped,
        Delivered,
    }
}

fn describe(status: &Status<OrderStatus>) -> &'static str {
    match status.state {
        OrderStatus::New => "Order is in NEW state.",
        OrderStatus::Processing => "Order is PROCESSING.",
        OrderStatus::Shipped => "Order has been SHIPPED.",
        OrderStatus::Delivered => "Order is DELIVERED.",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Lifecycle ===\n");

    let mut order = WorkflowFacade::from_chain(Chain::<OrderStatus>::from_variants()?);
    println!("States: {}\n", order.engine().chain().labels().join(" -> "));

    println!("{}", describe(&order.status()));

    if let Err(e) = order.revert() {
        println!("  Refused: {}", e);
    }

    for _ in 0..4 {
        match order.advance() {
            Ok(record) => {
                println!("  Moved {} -> {}", record.from.name(), record.to.name());
                println!("{}", describe(&order.status()));
            }
            Err(e) => println!("  Refused: {}", e),
        }
    }

    println!("\nCustomer reports a lost parcel; stepping back once.");
    let record = order.revert()?;
    println!("  Moved {} -> {} ({})", record.from.name(), record.to.name(), record.direction);
    println!("{}", describe(&order.status()));

    let path: Vec<_> = order
        .context()
        .journal()
        .path()
        .into_iter()
        .map(|s| s.name())
        .collect();
    println!("\nJournal path: {}", path.join(" -> "));

    println!("\n=== Demo Complete ===");
    Ok(())
}
