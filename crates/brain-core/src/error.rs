//! Error types for model invocation.

use thiserror::Error;

/// Errors a [`ModelClient`](crate::ModelClient) can report.
///
/// The orchestrator treats every variant as an upstream failure and never
/// retries; retry policy belongs to the client implementation.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The client is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced a response (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The model API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response could not be decoded or normalized.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
