//! Local executor for fetch and mutate functions.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::ExecutionError;
use crate::handler::FunctionArgs;
use crate::registry::FunctionRegistry;
use crate::validation::parse_arguments;

/// Execution settings applied to every call.
#[derive(Debug, Clone, Default)]
pub struct ExecutorPolicy {
    /// Abort handlers that run longer than this.
    pub timeout: Option<Duration>,
    /// Wrap results as `{"function", "result"}` instead of the bare value.
    pub format_results_as_json: bool,
}

impl ExecutorPolicy {
    /// Read the policy from the environment.
    ///
    /// - `GENUI_FUNCTION_TIMEOUT_SECS` - per-call timeout (default: none)
    /// - `GENUI_FUNCTION_RESULTS_JSON` - wrap results in an envelope (default: false)
    pub fn from_env() -> Self {
        let timeout = std::env::var("GENUI_FUNCTION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let format_results_as_json = std::env::var("GENUI_FUNCTION_RESULTS_JSON")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Self {
            timeout,
            format_results_as_json,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_json_results(mut self, enabled: bool) -> Self {
        self.format_results_as_json = enabled;
        self
    }
}

/// Result of a successful local execution.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionOutput {
    /// Function that produced the value.
    pub name: String,
    /// Structured result returned by the handler.
    pub value: Value,
    /// Serialized form placed in the transcript.
    pub content: String,
}

/// Runs registered handlers with guarded argument parsing.
///
/// Holds no mutable state; one executor can serve any number of concurrent
/// orchestration runs.
pub struct LocalExecutor {
    registry: Arc<FunctionRegistry>,
    policy: ExecutorPolicy,
}

impl LocalExecutor {
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self::with_policy(registry, ExecutorPolicy::default())
    }

    pub fn with_policy(registry: Arc<FunctionRegistry>, policy: ExecutorPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.registry.as_ref()
    }

    pub fn policy(&self) -> &ExecutorPolicy {
        &self.policy
    }

    /// Execute a function by name with the model's raw argument string.
    pub async fn execute(
        &self,
        name: &str,
        raw_arguments: &str,
    ) -> Result<FunctionOutput, ExecutionError> {
        let (spec, handler) = self
            .registry
            .entry(name)
            .ok_or_else(|| ExecutionError::UnknownFunction(name.to_string()))?;

        let Some(handler) = handler else {
            return Err(ExecutionError::NotExecutable {
                name: name.to_string(),
                kind: spec.kind(),
            });
        };

        let params = parse_arguments(spec, raw_arguments).map_err(|reason| {
            warn!(function = %name, %reason, "Rejected function arguments");
            ExecutionError::InvalidArguments {
                name: name.to_string(),
                reason,
            }
        })?;

        info!(
            function = %name,
            args_len = raw_arguments.len(),
            "Executing function"
        );

        let call = handler.call(FunctionArgs::new(params));
        let result = match self.policy.timeout {
            Some(limit) => match timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(function = %name, "Function execution timed out");
                    return Err(ExecutionError::Timeout {
                        name: name.to_string(),
                    });
                }
            },
            None => call.await,
        };

        let value = result.map_err(|error| {
            warn!(function = %name, %error, "Function execution failed");
            ExecutionError::from_handler(name, error)
        })?;

        let content = self.format_result(name, &value);
        debug!(function = %name, content_len = content.len(), "Function completed");

        Ok(FunctionOutput {
            name: name.to_string(),
            value,
            content,
        })
    }

    fn format_result(&self, name: &str, value: &Value) -> String {
        if self.policy.format_results_as_json {
            serde_json::json!({
                "function": name,
                "result": value,
            })
            .to_string()
        } else {
            value.to_string()
        }
    }
}
