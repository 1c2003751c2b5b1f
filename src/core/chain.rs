//! The linear chain of state definitions a workflow moves along.

use super::state::{State, StateSet};
use crate::builder::{BuildError, ChainBuilder};
use serde::Serialize;

/// One lifecycle stage and the neighbors it permits.
///
/// Definitions are derived from a chain's ordering and never built by hand,
/// so the neighbor links always agree with each other.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct StateDefinition<S: State> {
    state: S,
    position: usize,
    is_initial: bool,
    is_terminal: bool,
    predecessor: Option<S>,
    successor: Option<S>,
}

impl<S: State> StateDefinition<S> {
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Zero-based position in the chain.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// The state `revert` moves to, `None` on the initial state.
    pub fn predecessor(&self) -> Option<&S> {
        self.predecessor.as_ref()
    }

    /// The state `advance` moves to, `None` on the terminal state.
    pub fn successor(&self) -> Option<&S> {
        self.successor.as_ref()
    }
}

/// A fixed, linear, non-empty sequence of distinct states.
///
/// The first state is initial and the last is terminal. A single-state chain
/// is allowed, in which case that state is both.
///
/// # Example
///
/// ```rust
/// use rewind::core::Chain;
/// use rewind::state_enum;
///
/// state_enum! {
///     pub enum OrderStatus {
///         New,
///         Processing,
///         Shipped,
///         Delivered,
///     }
/// }
///
/// let chain = Chain::<OrderStatus>::from_variants().unwrap();
/// assert_eq!(chain.len(), 4);
/// assert_eq!(chain.initial().state(), &OrderStatus::New);
/// assert_eq!(chain.terminal().state(), &OrderStatus::Delivered);
/// assert_eq!(
///     chain.initial().successor(),
///     Some(&OrderStatus::Processing)
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Chain<S: State> {
    definitions: Vec<StateDefinition<S>>,
}

impl<S: State> Chain<S> {
    /// Start a fluent builder.
    pub fn builder() -> ChainBuilder<S> {
        ChainBuilder::new()
    }

    /// Build a chain directly from an ordered list of states.
    pub fn from_states<I>(states: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
    {
        ChainBuilder::new().states(states).build()
    }

    /// Lay out already validated states. Callers go through [`ChainBuilder`].
    pub(crate) fn from_validated(states: Vec<S>) -> Self {
        let last = states.len().saturating_sub(1);
        let definitions = states
            .iter()
            .enumerate()
            .map(|(position, state)| StateDefinition {
                state: state.clone(),
                position,
                is_initial: position == 0,
                is_terminal: position == last,
                predecessor: position.checked_sub(1).map(|p| states[p].clone()),
                successor: states.get(position + 1).cloned(),
            })
            .collect();
        Self { definitions }
    }

    pub fn definitions(&self) -> &[StateDefinition<S>] {
        &self.definitions
    }

    pub fn definition(&self, position: usize) -> Option<&StateDefinition<S>> {
        self.definitions.get(position)
    }

    pub fn initial(&self) -> &StateDefinition<S> {
        // Non-empty by construction.
        &self.definitions[0]
    }

    pub fn terminal(&self) -> &StateDefinition<S> {
        &self.definitions[self.definitions.len() - 1]
    }

    pub fn position_of(&self, state: &S) -> Option<usize> {
        self.definitions.iter().position(|d| &d.state == state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.position_of(state).is_some()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Chains built through [`ChainBuilder`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// States in chain order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.definitions.iter().map(|d| &d.state)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.states().map(|s| s.name()).collect()
    }
}

impl<S: StateSet> Chain<S> {
    /// Chain every variant of a state set in declaration order.
    pub fn from_variants() -> Result<Self, BuildError> {
        Self::from_states(S::variants())
    }
}
