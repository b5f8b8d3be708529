//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use agent_tools::{Classification, FunctionRegistry};

/// Funnel system prompt used when the model client has none configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
Enhance user engagement by creatively using text and UI elements in your responses.
Use the abilities in the \"functions\" section to provide richer interactions.
Use \"render_response\" to combine text and UI elements.
Keep the dialogue flowing.";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Bearer token required on `/api/chat*` when set.
    pub api_token: Option<String>,
    /// Value reported by `get_username`.
    pub username: String,
    /// Render function forced on turn zero of the funnel route.
    pub funnel_function: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            api_token: None,
            username: "guest".to_string(),
            funnel_function: "render_response".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GENUI_API_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `GENUI_API_TOKEN` | Bearer token for chat routes | (none) |
    /// | `GENUI_USERNAME` | Username served by `get_username` | `guest` |
    /// | `GENUI_FUNNEL_FUNCTION` | Function forced on the funnel route | `render_response` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let addr = match env::var("GENUI_API_ADDR") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidAddr(value))?,
            Err(_) => defaults.addr,
        };

        let api_token = env::var("GENUI_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let username = env::var("GENUI_USERNAME").unwrap_or(defaults.username);

        let funnel_function =
            env::var("GENUI_FUNNEL_FUNCTION").unwrap_or(defaults.funnel_function);

        Ok(Self {
            addr,
            api_token,
            username,
            funnel_function,
        })
    }

    /// Check that the funnel function is a registered render function.
    pub fn validate(&self, registry: &FunctionRegistry) -> Result<(), ConfigError> {
        match registry.classify(&self.funnel_function) {
            Classification::Render => Ok(()),
            _ => Err(ConfigError::InvalidFunnel(self.funnel_function.clone())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid GENUI_API_ADDR: {0}")]
    InvalidAddr(String),

    #[error("GENUI_FUNNEL_FUNCTION '{0}' is not a registered render function")]
    InvalidFunnel(String),
}
