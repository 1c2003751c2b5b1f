//! Build errors for chains and engines.

use thiserror::Error;

/// One reason a list of states cannot form a chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainViolation {
    #[error("Chain has no states; it needs an initial and a terminal state")]
    Empty,

    #[error("State '{state}' appears at positions {first} and {second}")]
    DuplicateState {
        state: String,
        first: usize,
        second: usize,
    },
}

/// Errors that can occur when building chains and engines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Every violation found, not just the first
    #[error("Invalid chain ({} violation(s)): {}", .0.len(), join(.0))]
    InvalidChain(Vec<ChainViolation>),

    #[error("History depth must be at least 1")]
    ZeroHistoryDepth,
}

fn join(violations: &[ChainViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
