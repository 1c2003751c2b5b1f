//! Single call surface over the transition engine and checkpoint history.
//!
//! The facade does no validation of its own. It forwards each call to the
//! engine or to the context's history and folds their error types into one
//! [`WorkflowError`]. Because the two halves never see each other, either can
//! be replaced without touching the other.

mod error;

pub use error::{WorkflowError, WorkflowResult};

use crate::core::{Chain, Payload, State, TransitionRecord};
use crate::engine::{TransitionEngine, WorkflowContext};
use crate::history::Snapshot;
use serde::{Deserialize, Serialize};

/// A request that can be sent to [`WorkflowFacade::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Advance,
    Revert,
    Checkpoint,
    Undo,
    Status,
}

/// Successful result of a [`Command`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "")]
pub enum Outcome<S: State> {
    /// `Advance` or `Revert` moved the state pointer
    Moved(TransitionRecord<S>),
    /// `Checkpoint` pushed this snapshot
    Checkpointed(Snapshot),
    /// `Undo` popped this snapshot and restored its payload
    Restored(Snapshot),
    Status(Status<S>),
}

/// Where a workflow stands.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct Status<S: State> {
    pub state: S,
    pub label: String,
    /// Checkpoints that `undo` can still restore
    pub pending_checkpoints: usize,
    pub is_initial: bool,
    pub is_terminal: bool,
}

/// One workflow context and the engine that moves it.
///
/// # Example
///
/// ```rust
/// use rewind::facade::WorkflowFacade;
/// use rewind::core::Chain;
/// use rewind::state_enum;
///
/// state_enum! {
///     enum OrderStatus { New, Processing, Shipped, Delivered }
/// }
///
/// let mut order = WorkflowFacade::from_chain(Chain::<OrderStatus>::from_variants().unwrap());
///
/// order.payload_mut().set("address", "1 Main St");
/// order.checkpoint();
/// order.advance().unwrap();
///
/// order.payload_mut().set("address", "2 Side St");
/// order.undo().unwrap();
///
/// let status = order.status();
/// assert_eq!(status.label, "Processing");
/// assert_eq!(status.pending_checkpoints, 0);
/// assert!(order.undo().unwrap_err().is_empty_history());
/// ```
#[derive(Debug)]
pub struct WorkflowFacade<S: State> {
    engine: TransitionEngine<S>,
    context: WorkflowContext<S>,
}

impl<S: State> WorkflowFacade<S> {
    /// Start a fresh context on `engine`'s chain.
    pub fn new(engine: TransitionEngine<S>) -> Self {
        let context = engine.create_context();
        Self { engine, context }
    }

    pub fn with_payload(engine: TransitionEngine<S>, payload: Payload) -> Self {
        let context = engine.create_context_with(payload);
        Self { engine, context }
    }

    pub fn from_chain(chain: Chain<S>) -> Self {
        Self::new(TransitionEngine::new(chain))
    }

    pub(crate) fn from_parts(engine: TransitionEngine<S>, context: WorkflowContext<S>) -> Self {
        Self { engine, context }
    }

    pub fn advance(&mut self) -> WorkflowResult<TransitionRecord<S>> {
        Ok(self.engine.advance(&mut self.context)?)
    }

    pub fn revert(&mut self) -> WorkflowResult<TransitionRecord<S>> {
        Ok(self.engine.revert(&mut self.context)?)
    }

    pub fn checkpoint(&mut self) -> Snapshot {
        self.context.checkpoint()
    }

    pub fn undo(&mut self) -> WorkflowResult<Snapshot> {
        Ok(self.context.undo()?)
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.context.peek()
    }

    pub fn status(&self) -> Status<S> {
        let definition = self.context.current_definition();
        Status {
            state: definition.state().clone(),
            label: self.engine.current_label(&self.context).to_string(),
            pending_checkpoints: self.context.history().len(),
            is_initial: definition.is_initial(),
            is_terminal: definition.is_terminal(),
        }
    }

    /// Run one command and report its outcome.
    pub fn execute(&mut self, command: Command) -> WorkflowResult<Outcome<S>> {
        match command {
            Command::Advance => self.advance().map(Outcome::Moved),
            Command::Revert => self.revert().map(Outcome::Moved),
            Command::Checkpoint => Ok(Outcome::Checkpointed(self.checkpoint())),
            Command::Undo => self.undo().map(Outcome::Restored),
            Command::Status => Ok(Outcome::Status(self.status())),
        }
    }

    pub fn payload(&self) -> &Payload {
        self.context.payload()
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        self.context.payload_mut()
    }

    pub fn context(&self) -> &WorkflowContext<S> {
        &self.context
    }

    pub fn engine(&self) -> &TransitionEngine<S> {
        &self.engine
    }

    pub fn into_context(self) -> WorkflowContext<S> {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;
    use crate::engine::TransitionError;
    use crate::history::HistoryError;
    use crate::state_enum;

    state_enum! {
        enum OrderStatus {
            New,
            Processing,
            Shipped,
            Delivered,
        }
    }

    fn facade() -> WorkflowFacade<OrderStatus> {
        WorkflowFacade::from_chain(Chain::from_variants().unwrap())
    }

    #[test]
    fn status_reports_state_and_pending_checkpoints() {
        let mut workflow = facade();
        let status = workflow.status();
        assert_eq!(status.state, OrderStatus::New);
        assert_eq!(status.label, "New");
        assert_eq!(status.pending_checkpoints, 0);
        assert!(status.is_initial);
        assert!(!status.is_terminal);

        workflow.checkpoint();
        workflow.checkpoint();
        workflow.advance().unwrap();

        let status = workflow.status();
        assert_eq!(status.label, "Processing");
        assert_eq!(status.pending_checkpoints, 2);
        assert!(!status.is_initial);
    }

    #[test]
    fn errors_are_folded_into_workflow_error() {
        let mut workflow = facade();

        assert_eq!(
            workflow.revert().unwrap_err(),
            WorkflowError::Transition(TransitionError::InitialState {
                state: "New".to_string()
            })
        );
        assert_eq!(
            workflow.undo().unwrap_err(),
            WorkflowError::History(HistoryError::EmptyHistory)
        );

        for _ in 0..3 {
            workflow.advance().unwrap();
        }
        assert!(workflow.advance().unwrap_err().is_terminal_state());
    }

    #[test]
    fn execute_dispatches_commands() {
        let mut workflow = facade();
        workflow.payload_mut().set("qty", 1);

        let outcome = workflow.execute(Command::Checkpoint).unwrap();
        assert!(matches!(outcome, Outcome::Checkpointed(ref s) if s.sequence() == 1));

        let outcome = workflow.execute(Command::Advance).unwrap();
        match outcome {
            Outcome::Moved(record) => {
                assert_eq!(record.from, OrderStatus::New);
                assert_eq!(record.to, OrderStatus::Processing);
                assert_eq!(record.direction, Direction::Forward);
            }
            other => panic!("Expected Moved, got {other:?}"),
        }

        workflow.payload_mut().set("qty", 5);
        let outcome = workflow.execute(Command::Undo).unwrap();
        assert!(matches!(outcome, Outcome::Restored(_)));
        assert_eq!(workflow.payload().get("qty").and_then(|v| v.as_i64()), Some(1));

        let outcome = workflow.execute(Command::Revert).unwrap();
        assert!(matches!(outcome, Outcome::Moved(ref r) if r.direction == Direction::Backward));

        match workflow.execute(Command::Status).unwrap() {
            Outcome::Status(status) => assert_eq!(status.state, OrderStatus::New),
            other => panic!("Expected Status, got {other:?}"),
        }

        assert!(workflow.execute(Command::Undo).unwrap_err().is_empty_history());
        assert!(workflow.execute(Command::Revert).unwrap_err().is_initial_state());
    }

    #[test]
    fn failed_commands_leave_workflow_unchanged() {
        let mut workflow = facade();
        workflow.payload_mut().set("note", "keep");

        let before = workflow.status();
        let _ = workflow.execute(Command::Undo);
        let _ = workflow.execute(Command::Revert);

        assert_eq!(workflow.status(), before);
        assert_eq!(
            workflow.payload().get("note").and_then(|v| v.as_str()),
            Some("keep")
        );
    }

    #[test]
    fn commands_deserialize_from_json() {
        let commands: Vec<Command> =
            serde_json::from_str(r#"["Checkpoint", "Advance", "Undo", "Status"]"#).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Checkpoint,
                Command::Advance,
                Command::Undo,
                Command::Status
            ]
        );
    }

    #[test]
    fn with_payload_seeds_context() {
        let engine = TransitionEngine::new(Chain::<OrderStatus>::from_variants().unwrap());
        let payload: Payload = [("name", "A")].into_iter().collect();
        let workflow = WorkflowFacade::with_payload(engine, payload.clone());

        assert_eq!(workflow.payload(), &payload);
        assert!(workflow.peek().is_none());
    }
}
