//! Journal of lifecycle moves.
//!
//! Every successful `advance` or `revert` appends one record. Refused moves
//! are not journaled, and undoing a payload checkpoint never rewrites it.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which way along the chain a move went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Backward => f.write_str("backward"),
        }
    }
}

/// Record of a single move between neighboring states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    pub direction: Direction,
    /// When the move happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only log of moves for one context.
///
/// # Example
///
/// ```rust
/// use rewind::core::{Direction, TransitionJournal, TransitionRecord};
/// use rewind::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase { One, Two }
/// }
///
/// let mut journal = TransitionJournal::new();
/// journal.record(TransitionRecord {
///     from: Phase::One,
///     to: Phase::Two,
///     direction: Direction::Forward,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(journal.path(), vec![&Phase::One, &Phase::Two]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionJournal<S: State> {
    records: Vec<TransitionRecord<S>>,
}

impl<S: State> Default for TransitionJournal<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionJournal<S> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, record: TransitionRecord<S>) {
        self.records.push(record);
    }

    /// States visited, in order: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Time between the first and last move, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &[TransitionRecord<S>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
