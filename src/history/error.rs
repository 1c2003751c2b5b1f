//! History error types.

use thiserror::Error;

/// Errors that can occur when rolling payload back
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// `undo` was called with no checkpoints saved
    #[error("No checkpoint to undo: history is empty")]
    EmptyHistory,
}
