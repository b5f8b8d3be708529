//! Run one orchestrated turn against the OpenAI API.
//!
//! Run with: cargo run -p orchestrator --example run_turn
//! Or with a custom message: cargo run -p orchestrator --example run_turn -- "Your message here"
//!
//! Configuration via .env file or environment variables:
//!   OPENAI_API_KEY  - API key for the model (required)
//!   GENUI_MAX_DEPTH - Depth bound (default: 10)
//!   GENUI_FORCE     - Function forced on the first call (default: none)

use std::env;
use std::sync::Arc;

use agent_tools::{default_registry, ExecutorPolicy};
use brain_core::{CallPolicy, Message};
use openai_brain::OpenAiBrain;
use orchestrator::{OrchestratorConfig, OrchestratorOutcome, TurnOrchestrator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,orchestrator=debug")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "What's the weather in Boston right now?".to_string()
    };

    let policy = env::var("GENUI_FORCE")
        .map(CallPolicy::forced)
        .unwrap_or_default();

    let orchestrator = TurnOrchestrator::with_config(
        Arc::new(OpenAiBrain::from_env()?),
        Arc::new(default_registry("example-user")?),
        OrchestratorConfig::from_env(),
        ExecutorPolicy::from_env(),
    );

    let output = orchestrator.run(&[Message::user(text)], &policy, None, 0).await?;

    println!("Finished at depth {}", output.depth);
    match output.outcome {
        OrchestratorOutcome::TextAnswer { text } => println!("Answer: {}", text),
        OrchestratorOutcome::RenderPayload(payload) => {
            println!("Render {}: {}", payload.name, payload.arguments);
            for child in payload.children().unwrap_or_default() {
                println!("  - {} {}", child.name, child.arguments);
            }
        }
        OrchestratorOutcome::Failure(failure) => println!("Failed: {:?}", failure),
    }

    Ok(())
}
