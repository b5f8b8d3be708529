//! Terminal values of an orchestration run.

use brain_core::{FunctionCall, Message};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrchestratorOutcome {
    /// The model answered in plain text.
    TextAnswer { text: String },
    /// The model asked for a UI component.
    RenderPayload(RenderPayload),
    /// The run failed.
    Failure(Failure),
}

impl OrchestratorOutcome {
    pub fn text(text: impl Into<String>) -> Self {
        Self::TextAnswer { text: text.into() }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// An unexecuted render call, returned to the UI layer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPayload {
    /// Render function name.
    pub name: String,
    /// Raw argument string exactly as the model produced it.
    pub arguments: String,
}

impl RenderPayload {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Parse the raw arguments.
    pub fn parsed_arguments(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }

    /// Render calls embedded in a composite payload (`elements` or
    /// `children`), in order. Nothing is executed.
    ///
    /// Child arguments given as JSON objects rather than strings are
    /// re-serialized so every child looks like a model call.
    pub fn children(&self) -> Result<Vec<FunctionCall>, serde_json::Error> {
        let value = self.parsed_arguments()?;
        let entries = ["elements", "children"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_array));

        let Some(entries) = entries else {
            return Ok(Vec::new());
        };

        Ok(entries
            .iter()
            .filter_map(|entry| {
                let name = entry.get("name")?.as_str()?;
                let arguments = match entry.get("arguments") {
                    Some(Value::String(raw)) => raw.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                Some(FunctionCall::new(name, arguments))
            })
            .collect())
    }
}

impl From<FunctionCall> for RenderPayload {
    fn from(call: FunctionCall) -> Self {
        Self {
            name: call.name,
            arguments: call.arguments,
        }
    }
}

/// Category of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    MaxDepthExceeded,
    UnknownFunction,
    FunctionExecutionError,
    UpstreamError,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaxDepthExceeded => "MaxDepthExceeded",
            Self::UnknownFunction => "UnknownFunction",
            Self::FunctionExecutionError => "FunctionExecutionError",
            Self::UpstreamError => "UpstreamError",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure document: `{"kind": ..., "detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
    /// Set when a `FunctionExecutionError` was caused by the arguments.
    /// Not part of the document.
    #[serde(skip)]
    pub invalid_arguments: bool,
}

/// A completed run: its outcome plus the run's private transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutput {
    /// `TextAnswer` or `RenderPayload`.
    pub outcome: OrchestratorOutcome,
    /// Caller's transcript followed by every message the run appended.
    pub transcript: Vec<Message>,
    /// Depth at which the run ended.
    pub depth: usize,
}
