//! Core types and traits shared by every genui crate.
//!
//! This crate defines the vocabulary the turn orchestrator speaks:
//!
//! - [`Message`] / [`Role`] / [`FunctionCall`] - Transcript entries
//! - [`FunctionSpec`] / [`FunctionKind`] - Callable function schemas and their
//!   fetch/render/mutate classification
//! - [`ModelClient`] - The trait every language-model backend implements
//! - [`InvocationResult`] / [`CallPolicy`] - What a model call returns and how
//!   it is allowed to choose functions
//! - [`BrainError`] - Error type for model invocation
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, BrainError, Invocation, InvocationResult, ModelClient};
//!
//! struct AlwaysHello;
//!
//! #[async_trait]
//! impl ModelClient for AlwaysHello {
//!     async fn invoke(&self, _invocation: Invocation<'_>) -> Result<InvocationResult, BrainError> {
//!         Ok(InvocationResult::answer("Hello!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "AlwaysHello"
//!     }
//! }
//! ```

mod client;
mod error;
mod functions;
mod message;

pub use client::{CallPolicy, Invocation, InvocationResult, ModelClient};
pub use error::BrainError;
pub use functions::{FunctionKind, FunctionSpec, UnclassifiedName};
pub use message::{is_paired, FunctionCall, Message, Role};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
