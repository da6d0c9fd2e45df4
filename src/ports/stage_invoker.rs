//! Stage Invoker Port - obtain one stage's output text.
//!
//! Invocation never fails to the caller. A stage that could not be completed
//! yields [`InvocationOutcome::Exhausted`], which the orchestrator stores as
//! the failure marker text so the pipeline can continue.

use async_trait::async_trait;

use crate::domain::catalog::StageDefinition;

/// Port for running a single stage against the reasoning service.
#[async_trait]
pub trait StageInvoker: Send + Sync {
    async fn invoke(&self, stage: &StageDefinition, prompt: &str) -> InvocationOutcome;
}

/// Tagged result of a stage invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Completed {
        text: String,
        /// Attempt (1-based) that succeeded.
        attempts: u32,
        /// Rounds whose response was kept, including the first.
        rounds: u32,
    },
    Exhausted {
        attempts: u32,
        last_error: String,
    },
}

impl InvocationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, InvocationOutcome::Completed { .. })
    }

    /// The text stored for the stage: the response, or the failure marker.
    pub fn into_text(self) -> String {
        match self {
            InvocationOutcome::Completed { text, .. } => text,
            InvocationOutcome::Exhausted {
                attempts,
                last_error,
            } => failure_marker(attempts, &last_error),
        }
    }
}

/// `API failed after <N> attempts. Last error: <cause>`
pub fn failure_marker(attempts: u32, last_error: &str) -> String {
    format!("API failed after {} attempts. Last error: {}", attempts, last_error)
}
