//! Configuration for OpenAiBrain.

use brain_core::BrainError;
use std::env;
use std::path::Path;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Default OpenAI API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default chat model. Must support the `functions` request field.
pub const DEFAULT_MODEL: &str = "gpt-4-0613";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for OpenAiBrain.
#[derive(Debug, Clone)]
pub struct OpenAiBrainConfig {
    /// OpenAI-compatible API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model used when an invocation carries no override.
    pub model: String,

    /// System prompt prepended to every request. Never stored in the transcript.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Model name (default: gpt-4-0613)
    /// - `OPENAI_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `OPENAI_PROMPT_FILE` - Path to system prompt file (default: SYSTEM_PROMPT.md)
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: unset)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: unset)
    /// - `OPENAI_TIMEOUT_SECS` - Request timeout (default: 60)
    ///
    /// System prompt priority:
    /// 1. `OPENAI_SYSTEM_PROMPT` env var (if set)
    /// 2. Contents of prompt file (if exists)
    /// 3. None
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| BrainError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url = env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let system_prompt = if let Ok(prompt) = env::var("OPENAI_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file = env::var("OPENAI_PROMPT_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file)
        };

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok());

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok());

        let timeout_secs = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            timeout_secs,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiBrainConfigBuilder {
        OpenAiBrainConfigBuilder::default()
    }
}

/// Builder for OpenAiBrainConfig.
#[derive(Debug, Default)]
pub struct OpenAiBrainConfigBuilder {
    config: OpenAiBrainConfig,
}

impl OpenAiBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiBrainConfig {
        self.config
    }

    /// Load system prompt from a file.
    ///
    /// If the file exists and is non-empty, sets the system prompt.
    pub fn load_prompt_file(mut self, path: impl AsRef<Path>) -> Self {
        if let Some(prompt) = load_prompt_file(path) {
            self.config.system_prompt = Some(prompt);
        }
        self
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAiBrainConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4-0613");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.temperature, None);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_builder_all_options() {
        let config = OpenAiBrainConfig::builder()
            .api_key("my-key")
            .api_url("http://localhost:8080")
            .model("gpt-4o-mini")
            .system_prompt("Render everything")
            .max_tokens(512)
            .temperature(0.2)
            .timeout_secs(5)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.system_prompt.as_deref(), Some("Render everything"));
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_builder_prompt_file() {
        let path = std::env::temp_dir().join(format!("openai-brain-prompt-{}.md", std::process::id()));
        std::fs::write(&path, "\n  Use render_response.  \n").unwrap();

        let config = OpenAiBrainConfig::builder().load_prompt_file(&path).build();
        assert_eq!(config.system_prompt.as_deref(), Some("Use render_response."));

        let missing = OpenAiBrainConfig::builder()
            .system_prompt("kept")
            .load_prompt_file(path.with_extension("missing"))
            .build();
        assert_eq!(missing.system_prompt.as_deref(), Some("kept"));

        std::fs::remove_file(&path).unwrap();
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_openai_vars() {
            for var in [
                "OPENAI_API_KEY",
                "OPENAI_API_URL",
                "OPENAI_MODEL",
                "OPENAI_SYSTEM_PROMPT",
                "OPENAI_PROMPT_FILE",
                "OPENAI_MAX_TOKENS",
                "OPENAI_TEMPERATURE",
                "OPENAI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        // Missing API key
        clear_all_openai_vars();
        match OpenAiBrainConfig::from_env() {
            Err(BrainError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set; point the prompt file somewhere that does not exist
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "test-env-key");
        std::env::set_var("OPENAI_PROMPT_FILE", "/nonexistent/SYSTEM_PROMPT.md");

        let config = OpenAiBrainConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4-0613");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.timeout_secs, 60);

        // All vars set
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "full-test-key");
        std::env::set_var("OPENAI_API_URL", "https://proxy.example.com");
        std::env::set_var("OPENAI_MODEL", "gpt-4o");
        std::env::set_var("OPENAI_SYSTEM_PROMPT", "Test prompt");
        std::env::set_var("OPENAI_MAX_TOKENS", "2048");
        std::env::set_var("OPENAI_TEMPERATURE", "0.9");
        std::env::set_var("OPENAI_TIMEOUT_SECS", "15");

        let config = OpenAiBrainConfig::from_env().unwrap();
        assert_eq!(config.api_url, "https://proxy.example.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.system_prompt.as_deref(), Some("Test prompt"));
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.timeout_secs, 15);

        // Unparseable numbers fall back to defaults
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "test-key");
        std::env::set_var("OPENAI_TIMEOUT_SECS", "soon");
        std::env::set_var("OPENAI_MAX_TOKENS", "lots");

        let config = OpenAiBrainConfig::from_env().unwrap();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_tokens, None);

        clear_all_openai_vars();
    }
}
