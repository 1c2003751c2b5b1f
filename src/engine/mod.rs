//! Transition engine for linear workflow chains.
//!
//! The engine interprets a [`Chain`] as the only legal-move graph: one step
//! forward to the successor, or one step back to the predecessor. Moving past
//! either end is reported as a [`TransitionError`] and leaves the context
//! untouched.
//!
//! Transitions only move the state pointer. They never read or write the
//! payload or its checkpoint history.

mod context;
mod error;

pub use context::{ContextId, WorkflowContext};
pub use error::TransitionError;

use crate::core::{Chain, Direction, Payload, State, TransitionRecord};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Applies forward and backward moves to workflow contexts.
///
/// # Example
///
/// ```rust
/// use rewind::core::Chain;
/// use rewind::engine::{TransitionEngine, TransitionError};
/// use rewind::state_enum;
///
/// state_enum! {
///     enum OrderStatus { New, Processing, Shipped, Delivered }
/// }
///
/// let engine = TransitionEngine::new(Chain::<OrderStatus>::from_variants().unwrap());
/// let mut order = engine.create_context();
///
/// assert!(matches!(
///     engine.revert(&mut order),
///     Err(TransitionError::InitialState { .. })
/// ));
///
/// engine.advance(&mut order).unwrap();
/// assert_eq!(engine.current_label(&order), "Processing");
/// ```
#[derive(Clone, Debug)]
pub struct TransitionEngine<S: State> {
    chain: Arc<Chain<S>>,
    history_depth: Option<NonZeroUsize>,
}

impl<S: State> TransitionEngine<S> {
    /// Create an engine over `chain` whose contexts keep unbounded history.
    pub fn new(chain: Chain<S>) -> Self {
        Self {
            chain: Arc::new(chain),
            history_depth: None,
        }
    }

    /// Bound the checkpoint history of contexts created from now on.
    pub fn with_history_depth(mut self, depth: NonZeroUsize) -> Self {
        self.history_depth = Some(depth);
        self
    }

    pub fn chain(&self) -> &Chain<S> {
        &self.chain
    }

    pub(crate) fn shared_chain(&self) -> &Arc<Chain<S>> {
        &self.chain
    }

    pub fn history_depth(&self) -> Option<NonZeroUsize> {
        self.history_depth
    }

    /// New context on the initial state with an empty payload.
    pub fn create_context(&self) -> WorkflowContext<S> {
        self.create_context_with(Payload::new())
    }

    /// New context on the initial state carrying `payload`.
    pub fn create_context_with(&self, payload: Payload) -> WorkflowContext<S> {
        let context = WorkflowContext::new(Arc::clone(&self.chain), payload, self.history_depth);
        tracing::debug!(
            context = %context.id(),
            state = context.current_state().name(),
            "context created"
        );
        context
    }

    /// Move `context` to its current state's successor.
    pub fn advance(
        &self,
        context: &mut WorkflowContext<S>,
    ) -> Result<TransitionRecord<S>, TransitionError> {
        let current = context.current_definition();
        if current.is_terminal() {
            let state = current.state().name().to_string();
            tracing::debug!(context = %context.id(), %state, "advance refused at terminal state");
            return Err(TransitionError::TerminalState { state });
        }

        let record = context.move_to(context.position() + 1, Direction::Forward);
        tracing::debug!(
            context = %context.id(),
            from = record.from.name(),
            to = record.to.name(),
            "advanced"
        );
        Ok(record)
    }

    /// Move `context` to its current state's predecessor.
    pub fn revert(
        &self,
        context: &mut WorkflowContext<S>,
    ) -> Result<TransitionRecord<S>, TransitionError> {
        let current = context.current_definition();
        if current.is_initial() {
            let state = current.state().name().to_string();
            tracing::debug!(context = %context.id(), %state, "revert refused at initial state");
            return Err(TransitionError::InitialState { state });
        }

        let record = context.move_to(context.position() - 1, Direction::Backward);
        tracing::debug!(
            context = %context.id(),
            from = record.from.name(),
            to = record.to.name(),
            "reverted"
        );
        Ok(record)
    }

    /// Name of the state `context` is in.
    pub fn current_label<'c>(&self, context: &'c WorkflowContext<S>) -> &'c str {
        context.current_state().name()
    }

    pub fn can_advance(&self, context: &WorkflowContext<S>) -> bool {
        !context.current_definition().is_terminal()
    }

    pub fn can_revert(&self, context: &WorkflowContext<S>) -> bool {
        !context.current_definition().is_initial()
    }
}
