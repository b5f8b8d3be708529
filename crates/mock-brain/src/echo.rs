//! Echo brain implementation - answers with the latest user message.

use async_trait::async_trait;
use brain_core::{BrainError, Invocation, InvocationResult, ModelClient, Role};

/// A simple client that echoes the most recent user message as its answer.
///
/// It never calls functions. Useful for exercising the answer path
/// end-to-end without any model.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will answer with "Echo: <latest user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl ModelClient for EchoBrain {
    async fn invoke(&self, invocation: Invocation<'_>) -> Result<InvocationResult, BrainError> {
        let text = invocation
            .transcript
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .and_then(|message| message.content.as_deref())
            .unwrap_or_default();

        let text = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        };

        Ok(InvocationResult::answer(text))
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
