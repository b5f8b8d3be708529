//! Transcript message types.

use serde::{Deserialize, Serialize};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
}

/// A function invocation requested by the model.
///
/// `arguments` is kept as the raw string the model produced so it can be
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to call.
    pub name: String,
    /// Arguments as a JSON-encoded string.
    #[serde(default)]
    pub arguments: String,
}

impl FunctionCall {
    /// Create a new function call.
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the author.
    pub role: Role,
    /// Text content. `None` for assistant messages that only carry a call.
    #[serde(default)]
    pub content: Option<String>,
    /// Function call requested by the assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// For `function` messages: the function that produced `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            function_call: None,
            name: None,
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    /// Create an assistant text message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    /// Create the assistant message that records a function call.
    pub fn assistant_call(call: FunctionCall) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            function_call: Some(call),
            name: None,
        }
    }

    /// Create a function-result message.
    pub fn function_result(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: Some(content.into()),
            function_call: None,
            name: Some(name.into()),
        }
    }
}

/// Check that every `function` message directly follows the assistant call
/// it answers.
pub fn is_paired(transcript: &[Message]) -> bool {
    transcript.iter().enumerate().all(|(index, message)| {
        if message.role != Role::Function {
            return true;
        }
        let Some(previous) = index.checked_sub(1).and_then(|i| transcript.get(i)) else {
            return false;
        };
        previous.role == Role::Assistant
            && previous
                .function_call
                .as_ref()
                .is_some_and(|call| Some(&call.name) == message.name.as_ref())
    })
}
