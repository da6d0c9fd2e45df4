//! Resilient stage invoker - retries, header fallback and continuation rounds.
//!
//! # Algorithm
//!
//! Each attempt walks the header variants in order and stops at the first
//! HTTP 200 whose body decodes. Once a variant succeeds, the stage's
//! remaining rounds post the previous answer back to the same endpoint with
//! the same variant; a failed round keeps the previous answer. After a failed
//! attempt the invoker sleeps `backoff_unit × (1 + 0.5 × attempt)` before the
//! next one. When every attempt fails the outcome is
//! [`InvocationOutcome::Exhausted`] carrying the last cause.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::catalog::StageDefinition;
use crate::ports::{
    HeaderVariant, InvocationOutcome, ReasoningRequest, ReasoningTransport, StageInvoker,
};

use super::response_text::decode_body;

/// User id sent with every request unless configured otherwise.
pub const DEFAULT_USER_ID: &str = "talos-rest-endpoint";

/// Retry budget and back-off pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per stage; each attempt tries every header variant.
    pub max_attempts: u32,
    /// Unit of the linear back-off between attempts.
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// Sleep after failed attempt `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_unit.mul_f64(1.0 + 0.5 * f64::from(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Identity presented to the reasoning service.
#[derive(Debug, Clone)]
pub struct ServiceIdentity {
    pub user_id: String,
    pub tenant_id: Option<String>,
    auth_token: Option<Secret<String>>,
}

impl ServiceIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id: None,
            auth_token: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_auth_token(mut self, token: Secret<String>) -> Self {
        self.auth_token = Some(token);
        self
    }

    fn header_variants(&self) -> Vec<HeaderVariant> {
        HeaderVariant::plan(
            self.tenant_id.as_deref(),
            self.auth_token.as_ref().map(|t| t.expose_secret().as_str()),
        )
    }
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}

/// [`StageInvoker`] over any [`ReasoningTransport`].
pub struct ResilientStageInvoker<T> {
    transport: T,
    identity: ServiceIdentity,
    policy: RetryPolicy,
}

impl<T: ReasoningTransport> ResilientStageInvoker<T> {
    pub fn new(transport: T, identity: ServiceIdentity, policy: RetryPolicy) -> Self {
        Self {
            transport,
            identity,
            policy,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One call; a non-200 status or undecodable body is a failure with its cause.
    async fn exchange(
        &self,
        stage: &StageDefinition,
        variant: &HeaderVariant,
        request: &ReasoningRequest,
    ) -> Result<String, String> {
        let response = self
            .transport
            .post(stage.endpoint(), variant, request)
            .await
            .map_err(|e| e.to_string())?;

        if !response.is_success() {
            return Err(format!("{}-{}", response.status, response.body));
        }

        decode_body(&response.body).map_err(|e| format!("invalid JSON body: {}", e))
    }

    /// Runs the continuation rounds. Returns the final text and the rounds kept.
    async fn continue_rounds(
        &self,
        stage: &StageDefinition,
        variant: &HeaderVariant,
        first: String,
    ) -> (String, u32) {
        let mut text = first;
        let mut kept = 1;
        for round in 2..=stage.round_count() {
            let request = ReasoningRequest::new(text.clone(), 1, self.identity.user_id.clone());
            match self.exchange(stage, variant, &request).await {
                Ok(next) => {
                    text = next;
                    kept += 1;
                }
                Err(cause) => {
                    debug!(stage = stage.name(), round, %cause, "continuation round failed, keeping previous text");
                }
            }
        }
        (text, kept)
    }
}

#[async_trait]
impl<T: ReasoningTransport> StageInvoker for ResilientStageInvoker<T> {
    async fn invoke(&self, stage: &StageDefinition, prompt: &str) -> InvocationOutcome {
        let variants = self.identity.header_variants();
        let request = ReasoningRequest::new(prompt, stage.round_count(), self.identity.user_id.clone());
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=self.policy.max_attempts {
            for variant in &variants {
                match self.exchange(stage, variant, &request).await {
                    Ok(first) => {
                        let (text, rounds) = self.continue_rounds(stage, variant, first).await;
                        info!(stage = stage.name(), attempt, rounds, variant = variant.label(), "stage completed");
                        return InvocationOutcome::Completed {
                            text,
                            attempts: attempt,
                            rounds,
                        };
                    }
                    Err(cause) => {
                        warn!(stage = stage.name(), attempt, variant = variant.label(), %cause, "stage call failed");
                        last_error = cause;
                    }
                }
            }

            if attempt < self.policy.max_attempts {
                let delay = self.policy.backoff_for(attempt);
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
        }

        warn!(stage = stage.name(), attempts = self.policy.max_attempts, %last_error, "stage exhausted");
        InvocationOutcome::Exhausted {
            attempts: self.policy.max_attempts,
            last_error,
        }
    }
}
