//! Rewind: a reversible linear workflow engine with snapshot-based rollback
//!
//! Rewind moves a workflow context along a fixed, linear chain of states, one
//! step at a time in either direction, and lets the context checkpoint and
//! undo its payload attributes through a per-context history stack.
//!
//! The two concerns are kept apart on purpose: transitions move only the
//! state pointer, and undo restores only the payload.
//!
//! # Core Concepts
//!
//! - **Chain**: ordered states; the first is initial, the last terminal
//! - **TransitionEngine**: `advance` / `revert` with boundary errors
//! - **History**: LIFO stack of timestamped, sequence-numbered snapshots
//! - **WorkflowFacade**: one call surface over both
//!
//! # Example
//!
//! ```rust
//! use rewind::prelude::*;
//! use rewind::state_enum;
//!
//! state_enum! {
//!     enum OrderStatus {
//!         New,
//!         Processing,
//!         Shipped,
//!         Delivered,
//!     }
//! }
//!
//! let chain = Chain::<OrderStatus>::from_variants().unwrap();
//! let mut order = WorkflowFacade::from_chain(chain);
//!
//! order.payload_mut().set("name", "A");
//! order.checkpoint();
//! order.payload_mut().set("name", "B");
//!
//! order.advance().unwrap();
//! order.undo().unwrap();
//!
//! assert_eq!(order.status().state, OrderStatus::Processing);
//! assert_eq!(order.payload().get("name").and_then(Value::as_str), Some("A"));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;
pub mod facade;
pub mod history;

// Re-export commonly used types
pub use crate::core::{Chain, Payload, State, StateDefinition, StateSet, Value};
pub use crate::engine::{TransitionEngine, TransitionError, WorkflowContext};
pub use crate::facade::{WorkflowError, WorkflowFacade};
pub use crate::history::{History, HistoryError, Snapshot};

/// Everything needed to declare a chain and drive a workflow.
pub mod prelude {
    pub use crate::builder::{BuildError, ChainBuilder};
    pub use crate::checkpoint::{CheckpointError, ContextCheckpoint};
    pub use crate::config::WorkflowConfig;
    pub use crate::core::{Chain, Direction, Payload, State, StateSet, Value};
    pub use crate::engine::{TransitionEngine, TransitionError, WorkflowContext};
    pub use crate::facade::{Command, Outcome, Status, WorkflowError, WorkflowFacade};
    pub use crate::history::{History, HistoryError, Snapshot};
}
