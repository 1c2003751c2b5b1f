//! Builder API for chain construction.
//!
//! This module provides a fluent builder and a declaration macro for
//! creating chains with minimal boilerplate. Validation accumulates every
//! violation so a bad state list is reported in one pass.

pub mod chain;
pub mod error;
pub mod macros;

pub use chain::ChainBuilder;
pub use error::{BuildError, ChainViolation};
