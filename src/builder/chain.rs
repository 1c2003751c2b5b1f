//! Builder for constructing chains.

use crate::builder::error::{BuildError, ChainViolation};
use crate::core::{Chain, State};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing a [`Chain`] with a fluent API.
///
/// States are chained in the order they are added. `build` reports every
/// problem with the list at once instead of stopping at the first.
pub struct ChainBuilder<S: State> {
    states: Vec<S>,
}

impl<S: State> ChainBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Append one state to the end of the chain.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Append several states, in order.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states.extend(states);
        self
    }

    /// Validate the ordering and lay out the chain.
    pub fn build(self) -> Result<Chain<S>, BuildError> {
        match validate(&self.states) {
            Validation::Success(_) => Ok(Chain::from_validated(self.states)),
            Validation::Failure(violations) => Err(BuildError::InvalidChain(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

impl<S: State> Default for ChainBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the chain is non-empty and every state occurs once.
fn validate<S: State>(states: &[S]) -> Validation<(), NonEmptyVec<ChainViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<ChainViolation>>> = Vec::new();

    if states.is_empty() {
        checks.push(Validation::fail(ChainViolation::Empty));
    }

    for (second, state) in states.iter().enumerate() {
        if let Some(first) = states[..second].iter().position(|s| s == state) {
            checks.push(Validation::fail(ChainViolation::DuplicateState {
                state: state.name().to_string(),
                first,
                second,
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum TestState {
            New,
            Processing,
            Shipped,
            Delivered,
        }
    }

    #[test]
    fn builder_chains_states_in_order() {
        let chain = ChainBuilder::new()
            .state(TestState::New)
            .state(TestState::Processing)
            .states([TestState::Shipped, TestState::Delivered])
            .build()
            .unwrap();

        assert_eq!(chain.labels(), ["New", "Processing", "Shipped", "Delivered"]);
    }

    #[test]
    fn builder_rejects_empty_chain() {
        let result = ChainBuilder::<TestState>::new().build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::InvalidChain(vec![ChainViolation::Empty])
        );
    }

    #[test]
    fn builder_accumulates_all_duplicates() {
        let result = ChainBuilder::new()
            .states([
                TestState::New,
                TestState::Processing,
                TestState::New,
                TestState::Shipped,
                TestState::Processing,
            ])
            .build();

        match result {
            Err(BuildError::InvalidChain(violations)) => {
                assert_eq!(
                    violations,
                    vec![
                        ChainViolation::DuplicateState {
                            state: "New".to_string(),
                            first: 0,
                            second: 2,
                        },
                        ChainViolation::DuplicateState {
                            state: "Processing".to_string(),
                            first: 1,
                            second: 4,
                        },
                    ]
                );
            }
            other => panic!("Expected InvalidChain, got {other:?}"),
        }
    }

    #[test]
    fn build_error_lists_every_violation() {
        let err = ChainBuilder::new()
            .states([TestState::New, TestState::New])
            .build()
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("1 violation(s)"));
        assert!(message.contains("'New' appears at positions 0 and 1"));
    }
}
