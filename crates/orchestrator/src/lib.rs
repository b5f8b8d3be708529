//! Bounded turn orchestrator for model-driven function calling.
//!
//! This crate provides [`TurnOrchestrator`], which runs one conversation
//! turn against a [`ModelClient`](brain_core::ModelClient) and a
//! [`FunctionRegistry`](agent_tools::FunctionRegistry).
//!
//! # Architecture
//!
//! ```text
//! transcript + call policy
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TURN ORCHESTRATOR                        │
//! │                                                             │
//! │  1. depth >= max_depth? → MaxDepthExceeded                  │
//! │         ↓                                                   │
//! │  2. Call the model (transcript, every schema, policy)       │
//! │         ↓                                                   │
//! │  3. Answer        → TextAnswer                              │
//! │     Invoke render → RenderPayload (never executed)          │
//! │     Invoke fetch  → execute, append call + result,          │
//! │     Invoke mutate   depth + 1, back to 1                    │
//! │     Invoke other  → UnknownFunction                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agent_tools::default_registry;
//! use brain_core::{CallPolicy, Message};
//! use openai_brain::OpenAiBrain;
//! use orchestrator::TurnOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(OpenAiBrain::from_env()?);
//!     let registry = Arc::new(default_registry("ada")?);
//!     let orchestrator = TurnOrchestrator::new(client, registry);
//!
//!     let transcript = vec![Message::user("What's the weather in Boston?")];
//!     let outcome = orchestrator
//!         .respond(&transcript, &CallPolicy::forced("render_response"), None)
//!         .await;
//!
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod orchestrator;
mod outcome;

pub use config::{OrchestratorConfig, MAX_DEPTH};
pub use error::OrchestratorError;
pub use orchestrator::TurnOrchestrator;
pub use outcome::{Failure, FailureKind, OrchestratorOutcome, RenderPayload, TurnOutput};

// Re-export commonly used types from dependencies
pub use tokio_util::sync::CancellationToken;
