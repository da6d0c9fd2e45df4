//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReasoningTransport` - a single HTTP exchange with the reasoning service
//! - `StageInvoker` - resilient production of one stage's output
//! - `ProgressListener` - stage progress notifications

mod progress_listener;
mod reasoning_transport;
mod stage_invoker;

pub use progress_listener::{NoOpProgressListener, ProgressListener};
pub use reasoning_transport::{
    HeaderVariant, ReasoningRequest, ReasoningTransport, TransportError, TransportResponse,
    ALT_TENANT_HEADER, TENANT_HEADER,
};
pub use stage_invoker::{failure_marker, InvocationOutcome, StageInvoker};
