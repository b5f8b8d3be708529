//! HTTP gateway for orchestrated generative-UI chat turns.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/functions` - registered function schemas and kinds
//! - `POST /api/chat` - funnel route, forces the funnel render function on turn zero
//! - `POST /api/chat-with-functions` - caller chooses the first call policy
//!
//! Text answers come back as `text/plain` (optionally chunked), render
//! payloads as a single JSON document, and failures as a non-2xx
//! `{"kind", "detail"}` document.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod transport;

use axum::Router;

pub use config::{Config, ConfigError, DEFAULT_SYSTEM_PROMPT};
pub use error::ApiError;
pub use state::AppState;

/// Build the application router with state attached.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}
