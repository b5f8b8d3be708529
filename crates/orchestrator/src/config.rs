//! Configuration for TurnOrchestrator.

use brain_core::CallPolicy;
use std::env;

/// Default bound on model calls that follow a function execution.
pub const MAX_DEPTH: usize = 10;

/// Configuration for TurnOrchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// A run at this depth fails without calling the model.
    pub max_depth: usize,

    /// Call policy for every model call after the first.
    pub follow_up_policy: CallPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            follow_up_policy: CallPolicy::Auto,
        }
    }
}

impl OrchestratorConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `GENUI_MAX_DEPTH` - Depth bound (default: 10, must be at least 1)
    pub fn from_env() -> Self {
        let max_depth = env::var("GENUI_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|depth| *depth > 0)
            .unwrap_or(MAX_DEPTH);

        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Set the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the policy for follow-up calls.
    pub fn with_follow_up_policy(mut self, policy: CallPolicy) -> Self {
        self.follow_up_policy = policy;
        self
    }
}
