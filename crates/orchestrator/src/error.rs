//! Error types for orchestrator operations.

use agent_tools::ExecutionError;
use brain_core::{BrainError, FunctionKind};
use thiserror::Error;

use crate::outcome::{Failure, FailureKind};

/// Errors that end an orchestration run.
///
/// Every variant is fatal for the run. Nothing here is retried or turned
/// into a fallback answer.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The run reached the depth bound before the model settled.
    #[error("maximum orchestration depth {max} reached")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// The model asked for a function the registry does not know.
    #[error("unknown function: {name}")]
    UnknownFunction {
        name: String,
        /// Category implied by the name prefix, if any.
        intended: Option<FunctionKind>,
    },

    /// A fetch or mutate function rejected its arguments or failed.
    #[error("function execution failed: {0}")]
    FunctionExecution(#[from] ExecutionError),

    /// The model client failed.
    #[error("upstream model error: {0}")]
    Upstream(#[from] BrainError),

    /// The caller went away before the run finished.
    #[error("orchestration cancelled")]
    Cancelled,
}

impl OrchestratorError {
    /// The failure-document kind for this error.
    ///
    /// Cancellation is reported as an upstream failure: the run was cut
    /// off while waiting on a collaborator.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MaxDepthExceeded { .. } => FailureKind::MaxDepthExceeded,
            Self::UnknownFunction { .. } => FailureKind::UnknownFunction,
            Self::FunctionExecution(_) => FailureKind::FunctionExecutionError,
            Self::Upstream(_) | Self::Cancelled => FailureKind::UpstreamError,
        }
    }

    /// Human-readable detail for the failure document.
    ///
    /// For unknown functions this is exactly the requested name.
    pub fn detail(&self) -> String {
        match self {
            Self::UnknownFunction { name, .. } => name.clone(),
            Self::Upstream(e) => e.to_string(),
            Self::FunctionExecution(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether a function rejected the model's arguments.
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::FunctionExecution(e) if e.is_invalid_arguments())
    }

    /// Convert into a serializable failure document.
    pub fn to_failure(&self) -> Failure {
        Failure {
            kind: self.kind(),
            detail: self.detail(),
            invalid_arguments: self.is_invalid_arguments(),
        }
    }
}
