//! OpenAI chat-completions request and response types (functions protocol).

use brain_core::{CallPolicy, FunctionCall, FunctionSpec, Message};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A function schema as the API expects it.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

impl From<&FunctionSpec> for FunctionDefinition {
    fn from(spec: &FunctionSpec) -> Self {
        Self {
            name: spec.name().to_string(),
            description: spec.description().map(str::to_string),
            parameters: spec.parameters().clone(),
        }
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Functions the model may call. Omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionDefinition>,
    /// Call policy. Only meaningful alongside `functions`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<CallPolicy>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Always false; the orchestrator needs the whole reply to classify it.
    pub stream: bool,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Response choices
    pub choices: Vec<Choice>,
    /// Token usage
    pub usage: Option<Usage>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// The message
    pub message: ResponseMessage,
    /// Finish reason ("stop", "function_call", "length", ...)
    pub finish_reason: Option<String>,
}

/// Response message. Carries text, a function call, or both.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role
    #[serde(default)]
    pub role: Option<String>,
    /// Content (null when the model called a function)
    #[serde(default)]
    pub content: Option<String>,
    /// Requested function call
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error details
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Error code (string or number depending on the provider)
    #[serde(default)]
    pub code: Option<Value>,
}
