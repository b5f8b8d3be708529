//! Mock model clients for orchestration tests.
//!
//! This crate provides implementations of [`ModelClient`] that never talk
//! to a real model:
//! - `ScriptedBrain` - Replays a fixed list of results and records every call
//! - `EchoBrain` - Answers with the latest user message
//! - `DelayedBrain` - Wraps another client with artificial delay
//!
//! For real model calls, use the `openai-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{CallPolicy, Invocation, InvocationResult, Message, ModelClient, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::new([InvocationResult::answer("Hi!")]);
//!     let transcript = vec![Message::user("Hello")];
//!
//!     let result = brain
//!         .invoke(Invocation {
//!             transcript: &transcript,
//!             functions: &[],
//!             policy: &CallPolicy::Auto,
//!             model: None,
//!         })
//!         .await?;
//!     assert_eq!(result, InvocationResult::answer("Hi!"));
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, BrainError, CallPolicy, FunctionCall, Invocation, InvocationResult, Message,
    ModelClient, Role,
};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use scripted::{RecordedInvocation, ScriptedBrain};
