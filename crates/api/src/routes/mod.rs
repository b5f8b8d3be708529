//! Route handlers.

pub mod chat;
pub mod functions;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Registry
        .route("/api/functions", get(functions::list_functions))
        // Chat
        .route("/api/chat", post(chat::chat))
        .route("/api/chat-with-functions", post(chat::chat_with_functions))
}
