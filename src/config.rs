//! Declarative workflow configuration.
//!
//! A [`WorkflowConfig`] names the ordered states of a chain and, optionally,
//! how many checkpoints each context keeps. It deserializes from JSON so the
//! chain can live next to the rest of an application's settings.
//!
//! ```rust
//! use rewind::config::WorkflowConfig;
//! use rewind::state_enum;
//!
//! state_enum! {
//!     enum OrderStatus { New, Processing, Shipped, Delivered }
//! }
//!
//! let config: WorkflowConfig<OrderStatus> = WorkflowConfig::from_json_str(
//!     r#"{ "states": ["New", "Processing", "Shipped", "Delivered"], "history_depth": 10 }"#,
//! )
//! .unwrap();
//!
//! let engine = config.engine().unwrap();
//! assert_eq!(engine.chain().len(), 4);
//! assert_eq!(engine.history_depth().map(|d| d.get()), Some(10));
//! ```

use crate::builder::{BuildError, ChainBuilder};
use crate::core::{State, StateSet};
use crate::engine::TransitionEngine;
use crate::facade::WorkflowFacade;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse workflow config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Chain layout and history policy for a workflow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct WorkflowConfig<S: State> {
    /// States in chain order; the first is initial, the last terminal
    pub states: Vec<S>,

    /// Maximum checkpoints kept per context; unbounded when absent
    #[serde(default)]
    pub history_depth: Option<usize>,
}

impl<S: State> WorkflowConfig<S> {
    pub fn new(states: Vec<S>) -> Self {
        Self {
            states,
            history_depth: None,
        }
    }

    pub fn history_depth(mut self, depth: usize) -> Self {
        self.history_depth = Some(depth);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration and build an engine from it.
    pub fn engine(&self) -> Result<TransitionEngine<S>, ConfigError> {
        let chain = ChainBuilder::new().states(self.states.clone()).build()?;
        let engine = TransitionEngine::new(chain);

        match self.history_depth {
            None => Ok(engine),
            Some(depth) => {
                let depth = NonZeroUsize::new(depth).ok_or(BuildError::ZeroHistoryDepth)?;
                Ok(engine.with_history_depth(depth))
            }
        }
    }

    /// Build an engine and start one context on it.
    pub fn facade(&self) -> Result<WorkflowFacade<S>, ConfigError> {
        Ok(WorkflowFacade::new(self.engine()?))
    }
}

impl<S: StateSet> Default for WorkflowConfig<S> {
    /// Every variant in declaration order, unbounded history.
    fn default() -> Self {
        Self::new(S::variants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ChainViolation;
    use crate::state_enum;

    state_enum! {
        enum OrderStatus {
            New,
            Processing,
            Shipped,
            Delivered,
        }
    }

    #[test]
    fn default_config_uses_every_variant() {
        let engine = WorkflowConfig::<OrderStatus>::default().engine().unwrap();
        assert_eq!(
            engine.chain().labels(),
            ["New", "Processing", "Shipped", "Delivered"]
        );
        assert!(engine.history_depth().is_none());
    }

    #[test]
    fn history_depth_is_optional_in_json() {
        let config: WorkflowConfig<OrderStatus> =
            WorkflowConfig::from_json_str(r#"{ "states": ["New", "Delivered"] }"#).unwrap();
        assert_eq!(config.history_depth, None);
        assert_eq!(config.engine().unwrap().chain().len(), 2);
    }

    #[test]
    fn unknown_state_fails_to_parse() {
        let result =
            WorkflowConfig::<OrderStatus>::from_json_str(r#"{ "states": ["New", "Cancelled"] }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_history_depth_is_rejected() {
        let result = WorkflowConfig::<OrderStatus>::default()
            .history_depth(0)
            .engine();
        assert!(matches!(
            result,
            Err(ConfigError::Build(BuildError::ZeroHistoryDepth))
        ));
    }

    #[test]
    fn invalid_chain_is_reported() {
        let result = WorkflowConfig::new(Vec::<OrderStatus>::new()).engine();
        match result {
            Err(ConfigError::Build(BuildError::InvalidChain(violations))) => {
                assert_eq!(violations, vec![ChainViolation::Empty]);
            }
            other => panic!("Expected InvalidChain, got {other:?}"),
        }
    }

    #[test]
    fn facade_starts_at_initial_state() {
        let workflow = WorkflowConfig::<OrderStatus>::default()
            .history_depth(3)
            .facade()
            .unwrap();
        assert_eq!(workflow.status().label, "New");
        assert_eq!(
            workflow.context().history().depth().map(|d| d.get()),
            Some(3)
        );
    }
}
