//! Turns an orchestration outcome into an HTTP response.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::{FailureKind, OrchestratorOutcome};

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// HTTP status for a failure kind.
pub fn failure_status(kind: FailureKind, invalid_arguments: bool) -> StatusCode {
    match kind {
        FailureKind::MaxDepthExceeded => StatusCode::LOOP_DETECTED,
        FailureKind::UnknownFunction => StatusCode::BAD_GATEWAY,
        FailureKind::FunctionExecutionError if invalid_arguments => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FailureKind::FunctionExecutionError => StatusCode::INTERNAL_SERVER_ERROR,
        FailureKind::UpstreamError => StatusCode::BAD_GATEWAY,
    }
}

/// Build the response for an outcome.
///
/// Text may be streamed. Render payloads always go out as one JSON
/// document so the UI can parse them atomically.
pub fn respond(outcome: OrchestratorOutcome, stream: bool) -> Response {
    match outcome {
        OrchestratorOutcome::TextAnswer { text } if stream => {
            let chunks = word_chunks(&text);
            let body = Body::from_stream(tokio_stream::iter(
                chunks.into_iter().map(Ok::<_, Infallible>),
            ));
            ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], body).into_response()
        }
        OrchestratorOutcome::TextAnswer { text } => {
            ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], text).into_response()
        }
        OrchestratorOutcome::RenderPayload(payload) => Json(payload).into_response(),
        OrchestratorOutcome::Failure(failure) => {
            let status = failure_status(failure.kind, failure.invalid_arguments);
            (status, Json(failure)).into_response()
        }
    }
}

/// Split text after each whitespace run so the chunks concatenate back
/// to the original.
fn word_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut has_word = false;
    let mut in_space = false;

    for c in text.chars() {
        if has_word && in_space && !c.is_whitespace() {
            chunks.push(std::mem::take(&mut current));
            has_word = false;
        }
        in_space = c.is_whitespace();
        has_word |= !in_space;
        current.push(c);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
