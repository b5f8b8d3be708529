//! The turn orchestrator.

use std::sync::Arc;

use agent_tools::{Classification, ExecutorPolicy, FunctionRegistry, LocalExecutor};
use brain_core::{
    CallPolicy, FunctionCall, FunctionSpec, Invocation, InvocationResult, Message, ModelClient,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::OrchestratorConfig;
use crate::error::OrchestratorError;
use crate::outcome::{OrchestratorOutcome, RenderPayload, TurnOutput};

/// Drives one conversation turn to a text answer or a render payload.
///
/// Each run calls the model, executes at most one fetch or mutate function
/// per model call, appends the call and its result to its own copy of the
/// transcript, and calls the model again. A render call or a text answer
/// ends the run. The registry is shared read-only, so one orchestrator can
/// serve concurrent runs.
pub struct TurnOrchestrator {
    client: Arc<dyn ModelClient>,
    executor: LocalExecutor,
    specs: Vec<FunctionSpec>,
    config: OrchestratorConfig,
}

impl TurnOrchestrator {
    /// Create an orchestrator with default configuration.
    pub fn new(client: Arc<dyn ModelClient>, registry: Arc<FunctionRegistry>) -> Self {
        Self::with_config(
            client,
            registry,
            OrchestratorConfig::default(),
            ExecutorPolicy::default(),
        )
    }

    /// Create an orchestrator with explicit configuration.
    pub fn with_config(
        client: Arc<dyn ModelClient>,
        registry: Arc<FunctionRegistry>,
        config: OrchestratorConfig,
        executor_policy: ExecutorPolicy,
    ) -> Self {
        let specs = registry.specs().cloned().collect();

        info!(
            client = client.name(),
            functions = registry.len(),
            max_depth = config.max_depth,
            "TurnOrchestrator initialized"
        );

        Self {
            client,
            executor: LocalExecutor::with_policy(registry, executor_policy),
            specs,
            config,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.executor.registry()
    }

    /// Schemas offered to the model, in registration order.
    pub fn specs(&self) -> &[FunctionSpec] {
        &self.specs
    }

    /// Run a turn starting at `depth`.
    ///
    /// `policy` applies to the first model call; later calls use the
    /// configured follow-up policy. The caller's transcript is never
    /// modified.
    pub async fn run(
        &self,
        transcript: &[Message],
        policy: &CallPolicy,
        model: Option<&str>,
        depth: usize,
    ) -> Result<TurnOutput, OrchestratorError> {
        self.run_with_cancel(transcript, policy, model, depth, &CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), abandoning the in-flight model or function
    /// call as soon as `cancel` fires.
    pub async fn run_with_cancel(
        &self,
        transcript: &[Message],
        policy: &CallPolicy,
        model: Option<&str>,
        depth: usize,
        cancel: &CancellationToken,
    ) -> Result<TurnOutput, OrchestratorError> {
        let result = self.drive(transcript.to_vec(), policy, model, depth, cancel).await;

        if let Err(ref e) = result {
            warn!(kind = %e.kind(), error = %e, "Orchestration run failed");
        }
        result
    }

    /// Run a turn from depth zero and fold failures into the outcome.
    pub async fn respond(
        &self,
        transcript: &[Message],
        policy: &CallPolicy,
        model: Option<&str>,
    ) -> OrchestratorOutcome {
        match self.run(transcript, policy, model, 0).await {
            Ok(output) => output.outcome,
            Err(e) => OrchestratorOutcome::Failure(e.to_failure()),
        }
    }

    async fn drive(
        &self,
        mut transcript: Vec<Message>,
        policy: &CallPolicy,
        model: Option<&str>,
        mut depth: usize,
        cancel: &CancellationToken,
    ) -> Result<TurnOutput, OrchestratorError> {
        let mut policy = policy;

        loop {
            if depth >= self.config.max_depth {
                return Err(OrchestratorError::MaxDepthExceeded {
                    depth,
                    max: self.config.max_depth,
                });
            }

            debug!(depth, messages = transcript.len(), policy = ?policy, "Awaiting model");
            let invocation = Invocation {
                transcript: &transcript,
                functions: &self.specs,
                policy,
                model,
            };
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(OrchestratorError::Cancelled),
                result = self.client.invoke(invocation) => result?,
            };

            let call = match result {
                InvocationResult::Answer { text } => {
                    debug!(depth, chars = text.len(), "Model answered");
                    return Ok(TurnOutput {
                        outcome: OrchestratorOutcome::TextAnswer { text },
                        transcript,
                        depth,
                    });
                }
                InvocationResult::Invoke(call) => call,
            };

            match self.registry().classify(&call.name) {
                Classification::Render => {
                    debug!(depth, function = %call.name, "Render requested, ending turn");
                    return Ok(TurnOutput {
                        outcome: OrchestratorOutcome::RenderPayload(RenderPayload::from(call)),
                        transcript,
                        depth,
                    });
                }
                Classification::Fetch | Classification::Mutate => {
                    let content = self.execute(&call, cancel).await?;
                    let name = call.name.clone();
                    transcript.push(Message::assistant_call(call));
                    transcript.push(Message::function_result(name, content));
                }
                Classification::Unknown { intended } => {
                    debug!(depth, function = %call.name, intended = ?intended, "Unknown function requested");
                    return Err(OrchestratorError::UnknownFunction {
                        name: call.name,
                        intended,
                    });
                }
            }

            depth += 1;
            policy = &self.config.follow_up_policy;
        }
    }

    async fn execute(
        &self,
        call: &FunctionCall,
        cancel: &CancellationToken,
    ) -> Result<String, OrchestratorError> {
        info!(
            function = %call.name,
            argument_bytes = call.arguments.len(),
            "Executing function"
        );

        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(OrchestratorError::Cancelled),
            output = self.executor.execute(&call.name, &call.arguments) => output?,
        };

        info!(
            function = %call.name,
            result_bytes = output.content.len(),
            "Function executed"
        );
        Ok(output.content)
    }
}
