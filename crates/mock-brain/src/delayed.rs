//! Delayed brain implementation - wraps another client with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use brain_core::{BrainError, Invocation, InvocationResult, ModelClient};
use tokio::time::sleep;

/// A client that wraps another client and adds artificial delay.
///
/// Useful for testing cancellation and simulating model latency.
pub struct DelayedBrain<B: ModelClient> {
    inner: B,
    delay: Duration,
}

impl<B: ModelClient> DelayedBrain<B> {
    /// Create a new DelayedBrain wrapping the given client with the specified delay.
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a client with a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get the wrapped client.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: ModelClient> ModelClient for DelayedBrain<B> {
    async fn invoke(&self, invocation: Invocation<'_>) -> Result<InvocationResult, BrainError> {
        sleep(self.delay).await;
        self.inner.invoke(invocation).await
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoBrain;
    use brain_core::{CallPolicy, Message};
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_brain() {
        let brain = DelayedBrain::with_millis(EchoBrain::new(), 100);
        let transcript = vec![Message::user("test")];

        let start = Instant::now();
        let result = brain
            .invoke(Invocation {
                transcript: &transcript,
                functions: &[],
                policy: &CallPolicy::Auto,
                model: None,
            })
            .await
            .unwrap();

        assert_eq!(result, InvocationResult::answer("test"));
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_brain_name() {
        let brain = DelayedBrain::with_millis(EchoBrain::new(), 0);
        assert_eq!(brain.name(), "DelayedBrain");
    }
}
