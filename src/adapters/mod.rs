//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `reasoning` - HTTP and mock transports plus the resilient stage invoker

pub mod reasoning;

pub use reasoning::{
    HttpReasoningTransport, MockReasoningTransport, MockReply, ResilientStageInvoker,
    RetryPolicy, ServiceIdentity,
};
