//! RunAnalysisHandler - Command handler for running one analysis.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, info_span, Instrument};

use crate::application::PipelineOrchestrator;
use crate::domain::analysis::{AnalysisInputs, AnalysisSession};
use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, Timestamp};

/// Customer value meaning "nothing selected yet".
pub const CUSTOMER_PLACEHOLDER: &str = "Select Customer";

/// Command to analyze a problem statement.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    pub customer: String,
    pub industry: String,
    pub problem_text: String,
}

impl RunAnalysisCommand {
    pub fn new(
        customer: impl Into<String>,
        industry: impl Into<String>,
        problem_text: impl Into<String>,
    ) -> Self {
        Self {
            customer: customer.into(),
            industry: industry.into(),
            problem_text: problem_text.into(),
        }
    }

    /// Checks the inputs before any remote call is made.
    pub fn validate(&self) -> Result<(), InputWarning> {
        let customer = self.customer.trim();
        if customer.is_empty() || customer == CUSTOMER_PLACEHOLDER {
            return Err(InputWarning::MissingCustomer);
        }
        if self.problem_text.trim().is_empty() {
            return Err(InputWarning::EmptyProblemStatement);
        }
        Ok(())
    }
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    pub run_id: AnalysisId,
    pub session: AnalysisSession,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub failed_stages: Vec<String>,
}

/// Input problems surfaced to the user as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputWarning {
    #[error("Please select a customer and enter a detailed problem statement.")]
    MissingCustomer,
    #[error("Please select a customer and enter a detailed problem statement.")]
    EmptyProblemStatement,
}

/// Errors from running an analysis.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(InputWarning),

    #[error("Analysis failed: {0}")]
    PipelineFailed(DomainError),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::InvalidInput(_) => ErrorCode::ValidationFailed,
            AnalysisError::PipelineFailed(err) => err.code,
        }
    }

    pub fn is_input_warning(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput(_))
    }
}

impl From<InputWarning> for AnalysisError {
    fn from(warning: InputWarning) -> Self {
        AnalysisError::InvalidInput(warning)
    }
}

/// Handler for running analyses.
pub struct RunAnalysisHandler {
    orchestrator: Arc<PipelineOrchestrator>,
}

impl RunAnalysisHandler {
    pub fn new(orchestrator: Arc<PipelineOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunAnalysisResult, AnalysisError> {
        // 1. Validate inputs
        cmd.validate()?;

        // 2. Run the pipeline inside a span for this run
        let run_id = AnalysisId::new();
        let span = info_span!("analysis", run_id = %run_id, customer = %cmd.customer);
        let started_at = Timestamp::now();
        let inputs = AnalysisInputs::new(cmd.customer, cmd.industry, cmd.problem_text);

        let session = self
            .orchestrator
            .run(inputs)
            .instrument(span.clone())
            .await
            .map_err(|err| {
                span.in_scope(|| error!(code = %err.code, error = %err, "analysis failed"));
                AnalysisError::PipelineFailed(err)
            })?;

        // 3. Summarise
        let finished_at = Timestamp::now();
        let failed_stages: Vec<String> = session.failed_stages().into_iter().map(String::from).collect();
        span.in_scope(|| {
            info!(
                overall = session.overall_score().value(),
                level = session.difficulty_level().label(),
                failed = failed_stages.len(),
                elapsed_ms = finished_at.duration_since(&started_at).num_milliseconds(),
                "analysis completed"
            )
        });

        Ok(RunAnalysisResult {
            run_id,
            session,
            started_at,
            finished_at,
            failed_stages,
        })
    }
}
