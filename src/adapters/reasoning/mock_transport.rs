//! Mock reasoning transport for testing.
//!
//! Queued replies are consumed in order. Once the queue is empty the
//! responder (if any) decides, otherwise a default `{"result": "Mock response"}`
//! is returned. Every call is recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockReasoningTransport::new()
//!     .with_reply(MockReply::status(503, "down"))
//!     .with_reply(MockReply::json(json!({"result": "ok"})));
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{
    HeaderVariant, ReasoningRequest, ReasoningTransport, TransportError, TransportResponse,
};

/// Body returned when nothing else is configured.
pub const DEFAULT_MOCK_BODY: &str = r#"{"result":"Mock response"}"#;

type Responder = Arc<dyn Fn(&str, &HeaderVariant, &ReasoningRequest) -> MockReply + Send + Sync>;

/// A configured reply.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Status { status: u16, body: String },
    Error(TransportError),
}

impl MockReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        MockReply::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP 200 with `value` as the JSON body.
    pub fn json(value: Value) -> Self {
        MockReply::status(200, value.to_string())
    }

    /// HTTP 200 with `{"result": text}`.
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::json(serde_json::json!({ "result": text.into() }))
    }

    pub fn error(err: TransportError) -> Self {
        MockReply::Error(err)
    }
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: String,
    pub headers: HeaderVariant,
    pub request: ReasoningRequest,
}

/// In-memory [`ReasoningTransport`].
#[derive(Clone, Default)]
pub struct MockReasoningTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    responder: Option<Responder>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl fmt::Debug for MockReasoningTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockReasoningTransport")
            .field("queued", &self.replies().len())
            .field("has_responder", &self.responder.is_some())
            .field("calls", &self.call_count())
            .finish()
    }
}

impl MockReasoningTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.replies().push_back(reply);
        self
    }

    /// Sets the responder used once the queue is drained.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str, &HeaderVariant, &ReasoningRequest) -> MockReply + Send + Sync + 'static,
    {
        self.responder = Some(Arc::new(responder));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.recorded().clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    /// Calls whose endpoint contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> Vec<RecordedCall> {
        self.recorded()
            .iter()
            .filter(|c| c.endpoint.contains(fragment))
            .cloned()
            .collect()
    }

    // Poisoned locks still hold valid data.
    fn replies(&self) -> MutexGuard<'_, VecDeque<MockReply>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_reply(&self, endpoint: &str, headers: &HeaderVariant, request: &ReasoningRequest) -> MockReply {
        if let Some(reply) = self.replies().pop_front() {
            return reply;
        }
        match &self.responder {
            Some(responder) => responder(endpoint, headers, request),
            None => MockReply::status(200, DEFAULT_MOCK_BODY),
        }
    }
}

#[async_trait]
impl ReasoningTransport for MockReasoningTransport {
    async fn post(
        &self,
        endpoint: &str,
        headers: &HeaderVariant,
        request: &ReasoningRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.recorded().push(RecordedCall {
            endpoint: endpoint.to_string(),
            headers: headers.clone(),
            request: request.clone(),
        });

        match self.next_reply(endpoint, headers, request) {
            MockReply::Status { status, body } => Ok(TransportResponse::new(status, body)),
            MockReply::Error(err) => Err(err),
        }
    }
}
