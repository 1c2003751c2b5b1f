//! Profile Edits with Undo
//!
//! This demo edits a user profile, checkpoints each version, and undoes the
//! edits newest first.
//!
//! Key concepts:
//! - Checkpoints copy the payload and get strictly increasing sequence numbers
//! - Undo restores the most recent checkpoint (LIFO) and never moves the state
//! - Undo on an empty history is a reported no-op
//! - Exporting a context as JSON for an external audit trail
//!
//! Run with: RUST_LOG=rewind=debug cargo run --example profile_undo

use rewind::prelude::*;
use rewind::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum ProfileStage {
        Draft,
        Verified,
    }
}

fn show(payload: &Payload) {
    let field = |key| payload.get(key).and_then(Value::as_str).unwrap_or("-");
    println!(
        "  Current State -> Name: {}, Email: {}",
        field("name"),
        field("email")
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Profile Edits with Undo ===\n");

    let config = WorkflowConfig::<ProfileStage>::default().history_depth(16);
    let mut profile = config.facade()?;

    for (name, email) in [
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
    ] {
        profile.payload_mut().set("name", name);
        profile.payload_mut().set("email", email);
        let snapshot = profile.checkpoint();
        println!("Checkpoint #{} saved", snapshot.sequence());
        show(profile.payload());
    }

    profile.advance()?;
    println!("\nProfile moved to {}", profile.status().label);

    println!("\nUndoing edits:");
    loop {
        match profile.undo() {
            Ok(snapshot) => {
                println!("Restored checkpoint #{}", snapshot.sequence());
                show(profile.payload());
            }
            Err(e) => {
                println!("  {}", e);
                break;
            }
        }
    }

    println!("\nStage after undo: {}", profile.status().label);
    println!("\nAudit export:\n{}", profile.export().to_json()?);

    println!("\n=== Demo Complete ===");
    Ok(())
}
