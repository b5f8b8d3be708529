//! Application state shared across handlers.

use std::sync::Arc;

use orchestrator::TurnOrchestrator;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Turn orchestrator (holds the model client and registry).
    pub orchestrator: Arc<TurnOrchestrator>,
    /// Bearer token required on chat routes, if any.
    pub api_token: Option<String>,
    /// Render function forced on turn zero of the funnel route.
    pub funnel_function: String,
}

impl AppState {
    /// Create new application state.
    pub fn new(orchestrator: Arc<TurnOrchestrator>, config: &Config) -> Self {
        Self {
            orchestrator,
            api_token: config.api_token.clone(),
            funnel_function: config.funnel_function.clone(),
        }
    }
}
