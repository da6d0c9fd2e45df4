//! Reasoning Service Adapters.
//!
//! - `HttpReasoningTransport` - reqwest transport for the hosted service
//! - `MockReasoningTransport` - scripted transport for tests and offline runs
//! - `ResilientStageInvoker` - retries, tenant-header fallback and continuation rounds

mod http_transport;
pub mod mock_transport;
mod resilient_invoker;
mod response_text;

pub use http_transport::HttpReasoningTransport;
pub use mock_transport::{MockReasoningTransport, MockReply, RecordedCall, DEFAULT_MOCK_BODY};
pub use resilient_invoker::{ResilientStageInvoker, RetryPolicy, ServiceIdentity, DEFAULT_USER_ID};
pub use response_text::{decode_body, flatten_response};
