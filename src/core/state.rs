//! State identity traits for workflow chains.
//!
//! A state is a plain value that names one lifecycle stage. Whether a state
//! is initial or terminal is not a property of the value itself: it follows
//! from where the state sits in the [`Chain`](super::Chain) it belongs to.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for workflow states.
///
/// States are small immutable identities. Everything about how they relate
/// to each other lives in the chain, so a type only has to say what it is
/// called.
///
/// # Required Traits
///
/// - `Clone`: states are copied into definitions, journals and checkpoints
/// - `PartialEq`: chains look states up by equality
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states travel inside exported checkpoints
///
/// # Example
///
/// ```rust
/// use rewind::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum TicketState {
///     Open,
///     InProgress,
///     Resolved,
/// }
///
/// impl State for TicketState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::InProgress => "InProgress",
///             Self::Resolved => "Resolved",
///         }
///     }
/// }
///
/// assert_eq!(TicketState::InProgress.name(), "InProgress");
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// A closed set of states with a natural declaration order.
///
/// Implemented by [`state_enum!`](crate::state_enum) so that an enum can be
/// turned into a chain without listing its variants twice.
pub trait StateSet: State {
    /// All variants, in the order they were declared.
    fn variants() -> Vec<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        New,
        Processing,
        Shipped,
        Delivered,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::New => "New",
                Self::Processing => "Processing",
                Self::Shipped => "Shipped",
                Self::Delivered => "Delivered",
            }
        }
    }

    impl StateSet for TestState {
        fn variants() -> Vec<Self> {
            vec![Self::New, Self::Processing, Self::Shipped, Self::Delivered]
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::New.name(), "New");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Shipped.name(), "Shipped");
        assert_eq!(TestState::Delivered.name(), "Delivered");
    }

    #[test]
    fn variants_follow_declaration_order() {
        let names: Vec<_> = TestState::variants()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["New", "Processing", "Shipped", "Delivered"]);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Shipped;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
