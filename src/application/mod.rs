//! Application layer - Orchestration, Commands, and Handlers.
//!
//! This layer drives the domain through its ports: the orchestrator runs the
//! stage pipeline, the handler validates and runs one analysis, and the
//! workspace owns the interactive session state.

pub mod handlers;
mod orchestrator;
mod workspace;

pub use handlers::{
    AnalysisError, InputWarning, RunAnalysisCommand, RunAnalysisHandler, RunAnalysisResult,
};
pub use orchestrator::PipelineOrchestrator;
pub use workspace::{AnalysisWorkspace, AnalyzeOutcome};
