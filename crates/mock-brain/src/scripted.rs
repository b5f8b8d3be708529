//! Scripted brain - replays canned results in order.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use brain_core::{BrainError, CallPolicy, Invocation, InvocationResult, Message, ModelClient};
use tokio::sync::Mutex;

/// A snapshot of one call made to a [`ScriptedBrain`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInvocation {
    /// Transcript as the client saw it.
    pub transcript: Vec<Message>,
    /// Names of the functions offered.
    pub functions: Vec<String>,
    /// Call policy used.
    pub policy: CallPolicy,
    /// Model override, if any.
    pub model: Option<String>,
}

/// A brain that returns pre-recorded results, one per call.
///
/// Once the script runs out every further call fails with
/// [`BrainError::InvalidResponse`], so a test that loops longer than
/// expected fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    script: Mutex<VecDeque<Result<InvocationResult, BrainError>>>,
    calls: Mutex<Vec<RecordedInvocation>>,
    call_count: AtomicUsize,
}

impl ScriptedBrain {
    /// Create a brain that replays the given results.
    pub fn new(results: impl IntoIterator<Item = InvocationResult>) -> Self {
        Self::with_script(results.into_iter().map(Ok))
    }

    /// Create a brain whose script may include failures.
    pub fn with_script(
        script: impl IntoIterator<Item = Result<InvocationResult, BrainError>>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a brain that requests the same function call forever.
    pub fn repeating(result: InvocationResult, times: usize) -> Self {
        Self::new(std::iter::repeat(result).take(times))
    }

    /// Append another result to the script.
    pub async fn push(&self, result: Result<InvocationResult, BrainError>) {
        self.script.lock().await.push_back(result);
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every call made so far, oldest first.
    pub async fn invocations(&self) -> Vec<RecordedInvocation> {
        self.calls.lock().await.clone()
    }

    /// Results not yet consumed.
    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl ModelClient for ScriptedBrain {
    async fn invoke(&self, invocation: Invocation<'_>) -> Result<InvocationResult, BrainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().await.push(RecordedInvocation {
            transcript: invocation.transcript.to_vec(),
            functions: invocation
                .functions
                .iter()
                .map(|spec| spec.name().to_string())
                .collect(),
            policy: invocation.policy.clone(),
            model: invocation.model.map(str::to_string),
        });

        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(BrainError::InvalidResponse("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
