//! The model-invocation interface consumed by the orchestrator.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BrainError;
use crate::functions::FunctionSpec;
use crate::message::{FunctionCall, Message};

/// How the model may use the offered functions on one call.
///
/// On the wire this is the `function_call` field of a chat-completion
/// request: `"auto"`, `"none"` or `{"name": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallPolicy {
    /// The model chooses between answering and calling any function.
    #[default]
    Auto,
    /// The model must answer in text.
    None,
    /// The model must call the named function.
    Forced(String),
}

impl CallPolicy {
    pub fn forced(name: impl Into<String>) -> Self {
        Self::Forced(name.into())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CallPolicyRepr {
    Mode(String),
    Named { name: String },
}

impl Serialize for CallPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            CallPolicy::Auto => CallPolicyRepr::Mode("auto".to_string()),
            CallPolicy::None => CallPolicyRepr::Mode("none".to_string()),
            CallPolicy::Forced(name) => CallPolicyRepr::Named { name: name.clone() },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CallPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match CallPolicyRepr::deserialize(deserializer)? {
            CallPolicyRepr::Mode(mode) => match mode.as_str() {
                "auto" => Ok(CallPolicy::Auto),
                "none" => Ok(CallPolicy::None),
                other => Err(serde::de::Error::unknown_variant(other, &["auto", "none"])),
            },
            CallPolicyRepr::Named { name } => Ok(CallPolicy::Forced(name)),
        }
    }
}

/// Everything a model client needs for one call.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Conversation so far, oldest first.
    pub transcript: &'a [Message],
    /// Every function the model may call.
    pub functions: &'a [FunctionSpec],
    /// Call policy for this request.
    pub policy: &'a CallPolicy,
    /// Model override; `None` uses the client's configured default.
    pub model: Option<&'a str>,
}

/// Normalized outcome of one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    /// The model replied in text.
    Answer { text: String },
    /// The model asked for exactly one function call.
    Invoke(FunctionCall),
}

impl InvocationResult {
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer { text: text.into() }
    }

    pub fn invoke(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::Invoke(FunctionCall::new(name, arguments))
    }
}

/// A language-model backend.
///
/// Implementations send the transcript and function schemas to a model and
/// normalize its reply into an [`InvocationResult`]. Any retry policy lives
/// inside the implementation; callers treat an `Err` as final.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one model call.
    async fn invoke(&self, invocation: Invocation<'_>) -> Result<InvocationResult, BrainError>;

    /// Get a human-readable name for this client.
    fn name(&self) -> &str;
}
