//! Chat endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::Response;
use brain_core::{CallPolicy, Message};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::transport;

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub stream: bool,
}

/// Body of `POST /api/chat-with-functions`.
#[derive(Debug, Deserialize)]
pub struct FunctionsChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub model: Option<String>,
    /// `"auto"`, `"none"` or `{"name": ...}`.
    #[serde(default)]
    pub function_call: CallPolicy,
    #[serde(default)]
    pub stream: bool,
}

/// Funnel route: the first model call must go through the funnel function.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response> {
    authorize(&state, &headers)?;
    let Json(request) = payload?;

    let policy = CallPolicy::forced(state.funnel_function.clone());
    run_turn(state, request.messages, policy, request.model, request.stream, "chat").await
}

/// Pass-through route: the caller picks the first call policy.
pub async fn chat_with_functions(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<FunctionsChatRequest>, JsonRejection>,
) -> Result<Response> {
    authorize(&state, &headers)?;
    let Json(request) = payload?;

    if let CallPolicy::Forced(ref name) = request.function_call {
        if !state.orchestrator.registry().contains(name) {
            return Err(ApiError::BadRequest(format!(
                "function_call names unregistered function '{}'",
                name
            )));
        }
    }

    run_turn(
        state,
        request.messages,
        request.function_call,
        request.model,
        request.stream,
        "chat-with-functions",
    )
    .await
}

/// Run the orchestrator on its own task. If the client disconnects, this
/// handler future is dropped and the guard cancels the run.
async fn run_turn(
    state: AppState,
    messages: Vec<Message>,
    policy: CallPolicy,
    model: Option<String>,
    stream: bool,
    route: &'static str,
) -> Result<Response> {
    if messages.is_empty() {
        return Err(ApiError::BadRequest("messages must not be empty".to_string()));
    }

    let run_id = Uuid::new_v4();
    let span = info_span!("turn", %run_id, route);
    info!(parent: &span, messages = messages.len(), model = ?model, "Starting turn");

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let orchestrator = state.orchestrator.clone();

    let handle = tokio::spawn(
        async move {
            orchestrator
                .run_with_cancel(&messages, &policy, model.as_deref(), 0, &cancel)
                .await
        }
        .instrument(span.clone()),
    );

    let output = handle
        .await
        .map_err(|e| ApiError::Internal(format!("orchestration task failed: {}", e)))??;

    info!(parent: &span, depth = output.depth, "Turn finished");
    Ok(transport::respond(output.outcome, stream))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.api_token.as_deref() else {
        return Ok(());
    };

    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(ApiError::Unauthorized);
    };

    let Ok(value) = value.to_str() else {
        return Err(ApiError::Unauthorized);
    };

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token != expected {
        return Err(ApiError::Unauthorized);
    }

    Ok(())
}
