//! Transition error types.

use thiserror::Error;

/// Refused moves at either end of the chain.
///
/// Both are routine: a caller probing the chain's boundaries is normal
/// usage. The context is unchanged when either is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// `advance` attempted from the terminal state
    #[error("State '{state}' is terminal; there is no next state")]
    TerminalState { state: String },

    /// `revert` attempted from the initial state
    #[error("State '{state}' is initial; there is no previous state")]
    InitialState { state: String },
}
