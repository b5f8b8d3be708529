//! Function registry, local executor and built-in functions.
//!
//! This crate owns everything the orchestrator needs to know about the
//! functions a model may call:
//!
//! - [`FunctionRegistry`] maps names to schemas, their fetch/render/mutate
//!   classification, and (for fetch and mutate) a [`FunctionHandler`].
//! - [`LocalExecutor`] runs a handler after a guarded parse and loose
//!   validation of the model's argument string.
//!
//! # Built-in Functions
//!
//! ## Fetch
//! - [`CurrentWeather`] - `get_current_weather` via wttr.in (no API key needed).
//! - [`CurrentTime`] - `get_current_time` from the system clock.
//! - [`Username`] - `get_username` from configuration.
//!
//! ## Render
//! - `render_buttons`, `render_chat_bubble`, `render_form`, `render_table`,
//!   `render_weather`, and the composites `render_response` and
//!   `render_flexbox` (see [`render_specs`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agent_tools::{default_registry, LocalExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(default_registry("ada")?);
//!     let executor = LocalExecutor::new(registry);
//!
//!     let output = executor.execute("get_username", "{}").await?;
//!     println!("{}", output.content); // {"username":"ada"}
//!     Ok(())
//! }
//! ```

mod error;
mod executor;
pub mod functions;
mod handler;
mod registry;
mod validation;

pub use error::{ExecutionError, HandlerError, RegistryError};
pub use executor::{ExecutorPolicy, FunctionOutput, LocalExecutor};
pub use functions::{render_specs, CurrentTime, CurrentWeather, TemperatureFormat, Username};
pub use handler::{handler_fn, FnHandler, FunctionArgs, FunctionHandler};
pub use registry::{Classification, FunctionRegistry};
pub use validation::parse_arguments;

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Create a registry with every built-in function registered.
///
/// `username` is the value `get_username` reports.
pub fn default_registry(username: impl Into<String>) -> Result<FunctionRegistry, RegistryError> {
    let mut registry = FunctionRegistry::new();

    // Fetch functions
    registry.register_handler(CurrentWeather::spec()?, CurrentWeather::new())?;
    registry.register_handler(CurrentTime::spec()?, CurrentTime::new())?;
    registry.register_handler(Username::spec()?, Username::new(username))?;

    // Render functions
    for spec in render_specs()? {
        registry.register_render(spec)?;
    }

    Ok(registry)
}
