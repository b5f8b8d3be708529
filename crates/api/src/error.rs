//! Error types for the HTTP layer.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use thiserror::Error;
use tracing::{error, warn};

use crate::transport::failure_status;

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or wrong bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// The request body could not be used.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The orchestration run failed.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Orchestrator(err) => {
                let status = failure_status(err.kind(), err.is_invalid_arguments());
                return (status, Json(err.to_failure())).into_response();
            }
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                (StatusCode::UNAUTHORIZED, "auth_error", "Unauthorized".to_string())
            }
            ApiError::BadRequest(msg) => {
                warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, "invalid_request_error", msg)
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = serde_json::json!({
            "error": {
                "message": message,
                "type": error_type
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
