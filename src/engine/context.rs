//! The entity a workflow sequences.

use crate::core::{
    Chain, Direction, Payload, State, StateDefinition, TransitionJournal, TransitionRecord,
};
use crate::history::{History, HistoryError, Snapshot};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identity of a workflow context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A mutable entity moving along a chain, with its own checkpoint history.
///
/// A context always sits on a state of the chain it was created with; it is
/// only created through [`TransitionEngine`](super::TransitionEngine), which
/// places it on the initial state with an empty history. The history and the
/// journal belong to this context alone and are dropped with it.
#[derive(Debug)]
pub struct WorkflowContext<S: State> {
    id: ContextId,
    chain: Arc<Chain<S>>,
    position: usize,
    payload: Payload,
    history: History,
    journal: TransitionJournal<S>,
}

impl<S: State> WorkflowContext<S> {
    pub(crate) fn new(
        chain: Arc<Chain<S>>,
        payload: Payload,
        history_depth: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            id: ContextId::generate(),
            chain,
            position: 0,
            payload,
            history: History::with_depth(history_depth),
            journal: TransitionJournal::new(),
        }
    }

    /// Reassemble a context from validated exported parts.
    pub(crate) fn from_parts(
        id: ContextId,
        chain: Arc<Chain<S>>,
        position: usize,
        payload: Payload,
        history: History,
        journal: TransitionJournal<S>,
    ) -> Self {
        Self {
            id,
            chain,
            position,
            payload,
            history,
            journal,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn chain(&self) -> &Chain<S> {
        &self.chain
    }

    pub fn current_definition(&self) -> &StateDefinition<S> {
        &self.chain.definitions()[self.position]
    }

    pub fn current_state(&self) -> &S {
        self.current_definition().state()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Mutable access for writes between checkpoints.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn journal(&self) -> &TransitionJournal<S> {
        &self.journal
    }

    /// Save the current payload. The lifecycle state is not captured.
    pub fn checkpoint(&mut self) -> Snapshot {
        let snapshot = self.history.checkpoint(&self.payload);
        tracing::debug!(
            context = %self.id,
            sequence = snapshot.sequence(),
            pending = self.history.len(),
            "checkpoint saved"
        );
        snapshot
    }

    /// Restore the newest checkpoint over the payload.
    ///
    /// The lifecycle state is left where it is.
    pub fn undo(&mut self) -> Result<Snapshot, HistoryError> {
        match self.history.undo(&mut self.payload) {
            Ok(snapshot) => {
                tracing::debug!(
                    context = %self.id,
                    sequence = snapshot.sequence(),
                    pending = self.history.len(),
                    "checkpoint restored"
                );
                Ok(snapshot)
            }
            Err(err) => {
                tracing::debug!(context = %self.id, "undo refused: {err}");
                Err(err)
            }
        }
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.history.peek()
    }

    /// Move to a neighboring position and journal the move.
    pub(crate) fn move_to(&mut self, position: usize, direction: Direction) -> TransitionRecord<S> {
        let record = TransitionRecord {
            from: self.current_state().clone(),
            to: self.chain.definitions()[position].state().clone(),
            direction,
            timestamp: Utc::now(),
        };
        self.position = position;
        self.journal.record(record.clone());
        record
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}
