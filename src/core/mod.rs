//! Core workflow types.
//!
//! This module holds the plain data the engine interprets:
//! - State identities via the `State` trait
//! - The linear `Chain` of `StateDefinition`s
//! - The `Payload` attribute set carried by a context
//! - The `TransitionJournal` of successful moves
//!
//! Nothing here performs a transition; that is the engine's job.

mod chain;
mod journal;
mod payload;
mod state;

pub use chain::{Chain, StateDefinition};
pub use journal::{Direction, TransitionJournal, TransitionRecord};
pub use payload::{Payload, Value};
pub use state::{State, StateSet};
