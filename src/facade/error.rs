//! Aggregate error type for the workflow facade.

use crate::engine::TransitionError;
use crate::history::HistoryError;
use thiserror::Error;

/// Any refusal the facade can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl WorkflowError {
    pub fn is_terminal_state(&self) -> bool {
        matches!(self, Self::Transition(TransitionError::TerminalState { .. }))
    }

    pub fn is_initial_state(&self) -> bool {
        matches!(self, Self::Transition(TransitionError::InitialState { .. }))
    }

    pub fn is_empty_history(&self) -> bool {
        matches!(self, Self::History(HistoryError::EmptyHistory))
    }
}

/// Result alias for facade operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
