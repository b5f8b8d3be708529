//! Error types for registry and function execution.

use brain_core::{FunctionKind, UnclassifiedName};
use thiserror::Error;

/// Errors raised while building a [`FunctionRegistry`](crate::FunctionRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Name carries no classification prefix.
    #[error(transparent)]
    Unclassifiable(#[from] UnclassifiedName),

    /// A function with this name is already registered.
    #[error("function already registered: {0}")]
    Duplicate(String),

    /// Render functions take no handler; fetch and mutate functions need one.
    #[error("{kind} function '{name}' {reason}")]
    HandlerMismatch {
        name: String,
        kind: FunctionKind,
        reason: &'static str,
    },

    /// The parameter schema is not an object schema.
    #[error("invalid parameter schema for '{name}': {reason}")]
    InvalidSchema { name: String, reason: String },
}

/// Errors a handler reports back to the executor.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The arguments did not fit the handler's expectations.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// General execution error.
    #[error("execution failed: {0}")]
    Failed(String),
}

/// Errors from [`LocalExecutor::execute`](crate::LocalExecutor::execute).
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// No function with this name is registered.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// The function is registered but has no server-side handler.
    #[error("{kind} function '{name}' cannot be executed locally")]
    NotExecutable { name: String, kind: FunctionKind },

    /// Arguments failed to parse or validate.
    #[error("invalid arguments for '{name}': {reason}")]
    InvalidArguments { name: String, reason: String },

    /// The handler ran and failed.
    #[error("function '{name}' failed: {reason}")]
    Failed { name: String, reason: String },

    /// The handler did not finish within the configured timeout.
    #[error("function '{name}' timed out")]
    Timeout { name: String },
}

impl ExecutionError {
    pub(crate) fn from_handler(name: &str, error: HandlerError) -> Self {
        match error {
            HandlerError::InvalidArguments(reason) => Self::InvalidArguments {
                name: name.to_string(),
                reason,
            },
            other => Self::Failed {
                name: name.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Whether the failure was caused by the arguments rather than the handler.
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments { .. })
    }
}
