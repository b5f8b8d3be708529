//! OpenAiBrain implementation using the chat-completions functions protocol.

use std::time::Duration;

use brain_core::{
    async_trait, BrainError, CallPolicy, Invocation, InvocationResult, Message, ModelClient,
};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, FunctionDefinition,
};
use crate::config::OpenAiBrainConfig;

/// A [`ModelClient`] backed by an OpenAI-compatible chat-completions API.
///
/// The client is stateless: every call sends the full transcript it is
/// given, with the configured system prompt prepended.
pub struct OpenAiBrain {
    client: Client,
    config: OpenAiBrainConfig,
}

impl OpenAiBrain {
    /// Create a new OpenAiBrain with the given configuration.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            model = %config.model,
            api_url = %config.api_url,
            has_system_prompt = config.system_prompt.is_some(),
            "OpenAiBrain initialized"
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiBrain from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(OpenAiBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    /// Build the request body for one invocation.
    pub(crate) fn build_request(&self, invocation: &Invocation<'_>) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(invocation.transcript.len() + 1);
        if let Some(ref system_prompt) = self.config.system_prompt {
            messages.push(Message::system(system_prompt.clone()));
        }
        messages.extend_from_slice(invocation.transcript);

        let functions: Vec<FunctionDefinition> =
            invocation.functions.iter().map(FunctionDefinition::from).collect();

        // The API rejects function_call without functions.
        let function_call = if functions.is_empty() {
            None
        } else {
            Some(invocation.policy.clone())
        };

        ChatCompletionRequest {
            model: invocation.model.unwrap_or(&self.config.model).to_string(),
            messages,
            functions,
            function_call,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: false,
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url.trim_end_matches('/'));

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            functions = request.functions.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            warn!(status = status.as_u16(), "Chat completion failed");
            return Err(BrainError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(ref usage) = completion.usage {
            debug!(
                id = %completion.id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Received chat completion"
            );
        }

        Ok(completion)
    }
}

/// Turn a completion into the orchestrator's view of it.
///
/// A function call wins over text. A reply with neither is invalid.
pub(crate) fn normalize(completion: ChatCompletionResponse) -> Result<InvocationResult, BrainError> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BrainError::InvalidResponse("No choices in response".to_string()))?;

    if let Some(call) = choice.message.function_call {
        if call.name.is_empty() {
            return Err(BrainError::InvalidResponse(
                "function_call without a name".to_string(),
            ));
        }
        return Ok(InvocationResult::Invoke(call));
    }

    choice
        .message
        .content
        .map(InvocationResult::answer)
        .ok_or_else(|| {
            BrainError::InvalidResponse("choice has neither content nor function_call".to_string())
        })
}

#[async_trait]
impl ModelClient for OpenAiBrain {
    async fn invoke(&self, invocation: Invocation<'_>) -> Result<InvocationResult, BrainError> {
        let request = self.build_request(&invocation);
        if let CallPolicy::Forced(ref name) = invocation.policy {
            debug!(function = %name, "Forcing function call");
        }

        let completion = self.chat_completion(&request).await?;
        normalize(completion)
    }

    fn name(&self) -> &str {
        "OpenAiBrain"
    }
}
