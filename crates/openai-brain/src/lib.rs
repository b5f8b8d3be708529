//! OpenAI-backed model client.
//!
//! [`OpenAiBrain`] implements [`brain_core::ModelClient`] over the
//! chat-completions API using the `functions` / `function_call` request
//! fields. Replies are normalized to either a text answer or a single
//! function call.
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_brain::OpenAiBrain;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = OpenAiBrain::from_env()?;
//!     println!("using {}", brain.config().model);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OpenAiBrain;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder, DEFAULT_MODEL};

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, BrainError, CallPolicy, Invocation, InvocationResult, Message, ModelClient,
};
