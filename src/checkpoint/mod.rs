//! Export and resume of a whole workflow context.
//!
//! A [`ContextCheckpoint`] is a plain, versioned value holding everything a
//! context owns: its lifecycle position, payload, pending snapshots, sequence
//! counter and journal. It can be encoded as JSON for readability or with
//! bincode for compactness. Where the bytes go is up to the caller.
//!
//! Resuming validates the checkpoint against the engine's chain before a
//! context is rebuilt, so a resumed context upholds the same invariants as a
//! fresh one.

pub mod error;

pub use error::CheckpointError;

use crate::core::{Payload, State, TransitionJournal};
use crate::engine::{ContextId, TransitionEngine, WorkflowContext};
use crate::facade::WorkflowFacade;
use crate::history::{History, Snapshot, MAX_SEQUENCE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable image of one workflow context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ContextCheckpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    pub context_id: ContextId,

    /// When the checkpoint was taken
    pub exported_at: DateTime<Utc>,

    /// The chain the context was created with, in order
    pub states: Vec<S>,

    pub current_state: S,

    pub payload: Payload,

    /// Pending snapshots, oldest first
    #[serde(deserialize_with = "deserialize_snapshots")]
    pub(crate) snapshots: Vec<Snapshot>,

    /// Sequence number the next checkpoint will receive
    pub next_sequence: u64,

    pub history_depth: Option<NonZeroUsize>,

    pub journal: TransitionJournal<S>,
}

/// Wire form of a snapshot. Only a checkpoint turns these back into snapshots.
#[derive(Deserialize)]
struct SnapshotRecord {
    sequence: u64,
    taken_at: DateTime<Utc>,
    payload: Payload,
}

fn deserialize_snapshots<'de, D>(deserializer: D) -> Result<Vec<Snapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<SnapshotRecord>::deserialize(deserializer)?;
    Ok(records
        .into_iter()
        .map(|r| Snapshot::restore(r.sequence, r.taken_at, r.payload))
        .collect())
}

impl<S: State> ContextCheckpoint<S> {
    /// Pending snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Encode as pretty JSON.
    ///
    /// Fails if any payload holds a NaN or infinite float, which JSON would
    /// silently turn into `null`.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        self.ensure_finite_floats()?;
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::SerializationFailed {
            format: "json",
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed {
            format: "json",
            message: e.to_string(),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed {
            format: "bincode",
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::DeserializationFailed {
            format: "bincode",
            message: e.to_string(),
        })
    }

    fn ensure_finite_floats(&self) -> Result<(), CheckpointError> {
        let payloads =
            std::iter::once(&self.payload).chain(self.snapshots.iter().map(Snapshot::payload));
        for payload in payloads {
            if let Some((key, _)) = payload.iter().find(|(_, value)| !value.is_finite()) {
                return Err(CheckpointError::SerializationFailed {
                    format: "json",
                    message: format!("attribute '{key}' holds a non-finite float"),
                });
            }
        }
        Ok(())
    }

    /// Check the checkpoint is internally consistent.
    fn validate_history(&self) -> Result<(), CheckpointError> {
        let mut previous = 0;
        for snapshot in &self.snapshots {
            if snapshot.sequence() <= previous {
                return Err(CheckpointError::ValidationFailed(format!(
                    "snapshot sequence {} does not follow {}",
                    snapshot.sequence(),
                    previous
                )));
            }
            previous = snapshot.sequence();
        }

        if previous >= self.next_sequence {
            return Err(CheckpointError::ValidationFailed(format!(
                "next sequence {} is not above newest snapshot {}",
                self.next_sequence, previous
            )));
        }

        if self.next_sequence > MAX_SEQUENCE {
            return Err(CheckpointError::ValidationFailed(format!(
                "next sequence {} exceeds maximum {}",
                self.next_sequence, MAX_SEQUENCE
            )));
        }

        if let Some(depth) = self.history_depth {
            if self.snapshots.len() > depth.get() {
                return Err(CheckpointError::ValidationFailed(format!(
                    "{} snapshots exceed history depth {}",
                    self.snapshots.len(),
                    depth
                )));
            }
        }

        Ok(())
    }
}

impl<S: State> WorkflowContext<S> {
    /// Capture everything this context owns.
    pub fn export(&self) -> ContextCheckpoint<S> {
        let history = self.history();
        ContextCheckpoint {
            version: CHECKPOINT_VERSION,
            context_id: self.id(),
            exported_at: Utc::now(),
            states: self.chain().states().cloned().collect(),
            current_state: self.current_state().clone(),
            payload: self.payload().clone(),
            snapshots: history.iter().cloned().collect(),
            next_sequence: history.next_sequence(),
            history_depth: history.depth(),
            journal: self.journal().clone(),
        }
    }
}

impl<S: State> TransitionEngine<S> {
    /// Rebuild a context from a checkpoint taken on this engine's chain.
    pub fn resume(
        &self,
        checkpoint: ContextCheckpoint<S>,
    ) -> Result<WorkflowContext<S>, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if !self.chain().states().eq(checkpoint.states.iter()) {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint chain {:?} does not match engine chain {:?}",
                checkpoint
                    .states
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>(),
                self.chain().labels()
            )));
        }

        let position = self
            .chain()
            .position_of(&checkpoint.current_state)
            .ok_or_else(|| {
                CheckpointError::ValidationFailed(format!(
                    "current state '{}' is not in the chain",
                    checkpoint.current_state.name()
                ))
            })?;

        if let Some(last) = checkpoint.journal.records().last() {
            if last.to != checkpoint.current_state {
                return Err(CheckpointError::ValidationFailed(format!(
                    "journal ends at '{}' but current state is '{}'",
                    last.to.name(),
                    checkpoint.current_state.name()
                )));
            }
        }

        checkpoint.validate_history()?;

        let history = History::from_parts(
            checkpoint.snapshots,
            checkpoint.next_sequence,
            checkpoint.history_depth,
        );
        let context = WorkflowContext::from_parts(
            checkpoint.context_id,
            Arc::clone(self.shared_chain()),
            position,
            checkpoint.payload,
            history,
            checkpoint.journal,
        );

        tracing::debug!(
            context = %context.id(),
            state = context.current_state().name(),
            pending = context.history().len(),
            "context resumed from checkpoint"
        );
        Ok(context)
    }
}

impl<S: State> WorkflowFacade<S> {
    pub fn export(&self) -> ContextCheckpoint<S> {
        self.context().export()
    }

    /// Resume a facade around a context restored on `engine`.
    pub fn resume(
        engine: TransitionEngine<S>,
        checkpoint: ContextCheckpoint<S>,
    ) -> Result<Self, CheckpointError> {
        let context = engine.resume(checkpoint)?;
        Ok(Self::from_parts(engine, context))
    }
}
