//! Immutable payload snapshots.

use crate::core::Payload;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A timestamped copy of a context's payload.
///
/// Only [`History`](super::History) creates snapshots, and nothing mutates
/// one after creation. The lifecycle state is not captured. Snapshots are
/// serializable but only come back in through a validated resume.
///
/// ```compile_fail
/// let snapshot: rewind::history::Snapshot =
///     serde_json::from_str(r#"{"sequence":1,"taken_at":"2024-01-01T00:00:00Z","payload":{}}"#)
///         .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    sequence: u64,
    taken_at: DateTime<Utc>,
    payload: Payload,
}

impl Snapshot {
    pub(crate) fn capture(sequence: u64, payload: &Payload) -> Self {
        Self {
            sequence,
            taken_at: Utc::now(),
            payload: payload.clone(),
        }
    }

    /// Rebuild a snapshot read back from a checkpoint.
    pub(crate) fn restore(sequence: u64, taken_at: DateTime<Utc>, payload: Payload) -> Self {
        Self {
            sequence,
            taken_at,
            payload,
        }
    }

    /// Position in the owning history's total order, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
