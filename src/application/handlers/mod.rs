//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod run_analysis;

pub use run_analysis::{
    AnalysisError, InputWarning, RunAnalysisCommand, RunAnalysisHandler, RunAnalysisResult,
    CUSTOMER_PLACEHOLDER,
};
