//! Generative-UI chat API server.

use std::sync::Arc;

use agent_tools::{default_registry, ExecutorPolicy};
use api::{AppState, Config, DEFAULT_SYSTEM_PROMPT};
use openai_brain::{OpenAiBrain, OpenAiBrainConfig};
use orchestrator::{OrchestratorConfig, TurnOrchestrator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let mut brain_config = OpenAiBrainConfig::from_env()?;
    if brain_config.system_prompt.is_none() {
        brain_config.system_prompt = Some(DEFAULT_SYSTEM_PROMPT.to_string());
    }
    let client = Arc::new(OpenAiBrain::new(brain_config)?);

    let registry = default_registry(config.username.clone())?;
    config.validate(&registry)?;

    let orchestrator = TurnOrchestrator::with_config(
        client,
        Arc::new(registry),
        OrchestratorConfig::from_env(),
        ExecutorPolicy::from_env(),
    );

    let state = AppState::new(Arc::new(orchestrator), &config);
    let app = api::app(state);

    info!(addr = %config.addr, funnel = %config.funnel_function, "Chat API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
