//! Reasoning Transport Port - one HTTP exchange with the reasoning service.
//!
//! The transport only moves bytes: it posts a [`ReasoningRequest`] with a set
//! of headers and hands back the status code and raw body. Retries, header
//! fallback and continuation rounds live in the invoker built on top of it.
//!
//! # Example
//!
//! ```ignore
//! let response = transport
//!     .post(stage.endpoint(), &variant, &ReasoningRequest::new(prompt, 2, "talos-rest-endpoint"))
//!     .await?;
//! if response.is_success() {
//!     // decode body
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Primary tenant header.
pub const TENANT_HEADER: &str = "Tenant-ID";
/// Alternate tenant header, tried when the primary is refused.
pub const ALT_TENANT_HEADER: &str = "X-Tenant-ID";

/// Port for posting a prompt to a reasoning endpoint.
#[async_trait]
pub trait ReasoningTransport: Send + Sync {
    /// Posts `request` as JSON to `endpoint` with the given headers.
    ///
    /// Any HTTP status is a successful exchange; only transport-level failures
    /// (timeouts, connection errors) are errors.
    async fn post(
        &self,
        endpoint: &str,
        headers: &HeaderVariant,
        request: &ReasoningRequest,
    ) -> Result<TransportResponse, TransportError>;
}

/// JSON body sent to the reasoning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningRequest {
    pub agency_goal: String,
    pub multiround_convo: u32,
    pub user_id: String,
}

impl ReasoningRequest {
    pub fn new(agency_goal: impl Into<String>, multiround_convo: u32, user_id: impl Into<String>) -> Self {
        Self {
            agency_goal: agency_goal.into(),
            multiround_convo,
            user_id: user_id.into(),
        }
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The service signals success with 200 only.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// One header combination to try against the service.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderVariant {
    headers: Vec<(String, String)>,
}

impl HeaderVariant {
    fn base() -> Self {
        Self {
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Header variants in the order they are tried.
    ///
    /// A tenant yields a primary and an alternate tenant header variant; no
    /// tenant yields a single variant. A token adds bearer auth to every variant.
    pub fn plan(tenant_id: Option<&str>, auth_token: Option<&str>) -> Vec<HeaderVariant> {
        let mut variants = match tenant_id.filter(|t| !t.is_empty()) {
            Some(tenant) => vec![
                Self::base().with(TENANT_HEADER, tenant),
                Self::base().with(ALT_TENANT_HEADER, tenant),
            ],
            None => vec![Self::base()],
        };

        if let Some(token) = auth_token.filter(|t| !t.is_empty()) {
            variants = variants
                .into_iter()
                .map(|v| v.with("Authorization", format!("Bearer {}", token)))
                .collect();
        }
        variants
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Short label for logs: which tenant header this variant uses.
    pub fn label(&self) -> &'static str {
        if self.get(TENANT_HEADER).is_some() {
            "tenant"
        } else if self.get(ALT_TENANT_HEADER).is_some() {
            "x-tenant"
        } else {
            "plain"
        }
    }
}

impl fmt::Debug for HeaderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.iter() {
            if name.eq_ignore_ascii_case("Authorization") {
                map.entry(&name, &"[REDACTED]");
            } else {
                map.entry(&name, &value);
            }
        }
        map.finish()
    }
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response within the per-call timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built (bad header value, bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
