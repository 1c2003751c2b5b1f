//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while exporting or resuming a context
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckpointError {
    /// Encoding to JSON or binary format failed
    #[error("Failed to encode checkpoint as {format}: {message}")]
    SerializationFailed {
        format: &'static str,
        message: String,
    },

    /// Decoding from JSON or binary format failed
    #[error("Failed to decode checkpoint from {format}: {message}")]
    DeserializationFailed {
        format: &'static str,
        message: String,
    },

    /// Checkpoint was written by an incompatible format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint contents contradict the engine or themselves
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
