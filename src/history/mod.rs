//! Checkpoint history for payload rollback.
//!
//! A [`History`] is a last-in-first-out stack of [`Snapshot`]s. Each
//! checkpoint copies the payload and receives the next sequence number;
//! each undo pops the newest snapshot and writes it back over the payload.
//!
//! Sequence numbers are never reused. Undoing removes the top snapshot but
//! the counter keeps going, so an external audit log can totally order every
//! checkpoint ever taken even after some were discarded.

mod error;
mod snapshot;

pub use error::HistoryError;
pub use snapshot::Snapshot;

use crate::core::Payload;
use serde::Serialize;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Highest sequence counter a history may be resumed with.
pub const MAX_SEQUENCE: u64 = i64::MAX as u64;

/// LIFO stack of payload snapshots owned by one workflow context.
///
/// Unbounded by default. A bounded history evicts its *oldest* snapshot once
/// a checkpoint would exceed the depth, so undo reaches back at most `depth`
/// steps. Histories are only created and changed through their context.
///
/// # Example
///
/// ```rust
/// use rewind::core::Chain;
/// use rewind::engine::TransitionEngine;
/// use rewind::history::HistoryError;
/// use rewind::state_enum;
///
/// state_enum! {
///     enum ProfileState { Draft, Published }
/// }
///
/// let engine = TransitionEngine::new(Chain::<ProfileState>::from_variants().unwrap());
/// let mut profile = engine.create_context();
/// profile.payload_mut().set("name", "A");
///
/// let first = profile.checkpoint();
/// assert_eq!(first.sequence(), 1);
/// assert_eq!(profile.history().last_sequence(), Some(1));
///
/// profile.payload_mut().set("name", "B");
/// let restored = profile.undo().unwrap();
/// assert_eq!(restored.sequence(), 1);
/// assert_eq!(profile.payload().get("name").and_then(|v| v.as_str()), Some("A"));
///
/// assert_eq!(profile.undo(), Err(HistoryError::EmptyHistory));
/// assert_eq!(profile.history().next_sequence(), 2);
/// ```
///
/// A history cannot be created on its own:
///
/// ```compile_fail
/// let history = rewind::history::History::new();
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    next_sequence: u64,
    depth: Option<NonZeroUsize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub(crate) fn new() -> Self {
        Self {
            snapshots: VecDeque::new(),
            next_sequence: 1,
            depth: None,
        }
    }

    /// Create an empty history keeping at most `depth` snapshots, if set.
    pub(crate) fn with_depth(depth: Option<NonZeroUsize>) -> Self {
        Self {
            depth,
            ..Self::new()
        }
    }

    /// Reassemble a history from exported parts. The caller validates them.
    pub(crate) fn from_parts(
        snapshots: Vec<Snapshot>,
        next_sequence: u64,
        depth: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            snapshots: snapshots.into(),
            next_sequence,
            depth,
        }
    }

    /// Copy `payload` into a new snapshot and push it.
    ///
    /// Always succeeds. Returns a copy of the pushed snapshot.
    pub(crate) fn checkpoint(&mut self, payload: &Payload) -> Snapshot {
        let snapshot = Snapshot::capture(self.next_sequence, payload);
        // Resume caps the counter at MAX_SEQUENCE, far below u64::MAX.
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.snapshots.push_back(snapshot.clone());

        if let Some(depth) = self.depth {
            while self.snapshots.len() > depth.get() {
                if let Some(evicted) = self.snapshots.pop_front() {
                    tracing::trace!(sequence = evicted.sequence(), "evicted oldest checkpoint");
                }
            }
        }

        snapshot
    }

    /// Pop the newest snapshot and overwrite `payload` with it.
    ///
    /// On an empty history `payload` is left exactly as it was.
    pub(crate) fn undo(&mut self, payload: &mut Payload) -> Result<Snapshot, HistoryError> {
        let snapshot = self.snapshots.pop_back().ok_or(HistoryError::EmptyHistory)?;
        *payload = snapshot.payload().clone();
        Ok(snapshot)
    }

    /// Look at the newest snapshot without popping it.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Number of pending checkpoints.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Sequence number the next checkpoint will receive.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Sequence number of the newest pending snapshot.
    pub fn last_sequence(&self) -> Option<u64> {
        self.peek().map(Snapshot::sequence)
    }

    pub fn depth(&self) -> Option<NonZeroUsize> {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str) -> Payload {
        [("name", name), ("email", email)].into_iter().collect()
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.peek().is_none());
        assert_eq!(history.next_sequence(), 1);
        assert_eq!(history.last_sequence(), None);
    }

    #[test]
    fn undo_restores_in_lifo_order() {
        let mut history = History::new();
        let mut payload = profile("A", "a@x.com");
        history.checkpoint(&payload);

        payload = profile("B", "b@x.com");
        history.checkpoint(&payload);

        payload = profile("C", "c@x.com");

        let second = history.undo(&mut payload).unwrap();
        assert_eq!(second.sequence(), 2);
        assert_eq!(payload, profile("B", "b@x.com"));

        let first = history.undo(&mut payload).unwrap();
        assert_eq!(first.sequence(), 1);
        assert_eq!(payload, profile("A", "a@x.com"));

        assert_eq!(history.undo(&mut payload), Err(HistoryError::EmptyHistory));
        assert_eq!(payload, profile("A", "a@x.com"));
    }

    #[test]
    fn undo_on_empty_history_leaves_payload_untouched() {
        let mut history = History::new();
        let mut payload = profile("A", "a@x.com");

        assert_eq!(history.undo(&mut payload), Err(HistoryError::EmptyHistory));
        assert_eq!(payload, profile("A", "a@x.com"));
    }

    #[test]
    fn undo_overwrites_rather_than_merges() {
        let mut history = History::new();
        let mut payload = profile("A", "a@x.com");
        history.checkpoint(&payload);

        payload.set("phone", "555-0100");
        history.undo(&mut payload).unwrap();

        assert!(!payload.contains_key("phone"));
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn sequence_numbers_are_never_reused() {
        let mut history = History::new();
        let payload = Payload::new();

        assert_eq!(history.checkpoint(&payload).sequence(), 1);
        assert_eq!(history.checkpoint(&payload).sequence(), 2);
        history.undo(&mut payload.clone()).unwrap();
        assert_eq!(history.checkpoint(&payload).sequence(), 3);

        let sequences: Vec<_> = history.iter().map(Snapshot::sequence).collect();
        assert_eq!(sequences, vec![1, 3]);
    }

    #[test]
    fn peek_does_not_pop() {
        let mut history = History::new();
        history.checkpoint(&profile("A", "a@x.com"));

        assert_eq!(history.peek().map(Snapshot::sequence), Some(1));
        assert_eq!(history.peek().map(Snapshot::sequence), Some(1));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut history = History::new();
        let mut payload = profile("A", "a@x.com");
        let snapshot = history.checkpoint(&payload);

        payload.set("name", "Z");

        assert_eq!(snapshot.payload(), &profile("A", "a@x.com"));
        assert_eq!(history.peek().unwrap().payload(), &profile("A", "a@x.com"));
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = History::with_depth(NonZeroUsize::new(2));
        let mut payload = Payload::new();

        for n in 1..=3 {
            payload.set("n", n);
            history.checkpoint(&payload);
        }

        assert_eq!(history.len(), 2);
        let sequences: Vec<_> = history.iter().map(Snapshot::sequence).collect();
        assert_eq!(sequences, vec![2, 3]);

        history.undo(&mut payload).unwrap();
        history.undo(&mut payload).unwrap();
        assert_eq!(payload.get("n").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(history.undo(&mut payload), Err(HistoryError::EmptyHistory));
    }

    #[test]
    fn counter_at_ceiling_still_checkpoints() {
        let mut history = History::from_parts(Vec::new(), MAX_SEQUENCE, None);
        let payload = Payload::new();

        assert_eq!(history.checkpoint(&payload).sequence(), MAX_SEQUENCE);
        assert_eq!(history.checkpoint(&payload).sequence(), MAX_SEQUENCE + 1);
        assert_eq!(history.next_sequence(), MAX_SEQUENCE + 2);
    }

    #[test]
    fn history_serializes_pending_snapshots() {
        let mut history = History::new();
        history.checkpoint(&profile("A", "a@x.com"));
        history.checkpoint(&profile("B", "b@x.com"));

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["next_sequence"], 3);
        assert_eq!(json["snapshots"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["snapshots"][1]["sequence"], 2);
    }
}
