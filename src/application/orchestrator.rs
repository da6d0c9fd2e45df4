//! PipelineOrchestrator - runs every catalog stage in order and scores the result.
//!
//! Stages run strictly one after another: each prompt is built from the
//! outputs recorded so far, so a stage never starts before its predecessor's
//! output is stored. A stage that exhausts its retries stores the failure
//! marker and the run continues.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::analysis::{AnalysisInputs, AnalysisSession, ScoreExtractor, StageResult};
use crate::domain::catalog::StageCatalog;
use crate::domain::foundation::DomainError;
use crate::ports::{InvocationOutcome, NoOpProgressListener, ProgressListener, StageInvoker};

/// Drives one analysis run end to end.
pub struct PipelineOrchestrator {
    catalog: Arc<StageCatalog>,
    invoker: Arc<dyn StageInvoker>,
    extractor: ScoreExtractor,
    listener: Arc<dyn ProgressListener>,
}

impl PipelineOrchestrator {
    pub fn new(catalog: Arc<StageCatalog>, invoker: Arc<dyn StageInvoker>) -> Self {
        Self {
            catalog,
            invoker,
            extractor: ScoreExtractor::new(),
            listener: Arc::new(NoOpProgressListener),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Runs the whole catalog against a fresh session.
    ///
    /// # Errors
    ///
    /// Blank inputs and session invariant violations (a duplicate stage name,
    /// a write after completion) surface as errors. Remote failures never do.
    pub async fn run(&self, inputs: AnalysisInputs) -> Result<AnalysisSession, DomainError> {
        inputs.validate()?;
        let mut session = AnalysisSession::begin(inputs);
        let total = self.catalog.len();

        for (index, stage) in self.catalog.iter().enumerate() {
            self.listener.on_stage_started(index, total, stage);
            debug!(stage = stage.name(), index, total, "stage started");

            let prompt = stage.build_prompt(session.problem_text(), &session.prior_outputs());
            let (result, succeeded) = match self.invoker.invoke(stage, &prompt).await {
                InvocationOutcome::Completed {
                    text,
                    attempts,
                    rounds,
                } => {
                    info!(stage = stage.name(), attempts, rounds, chars = text.len(), "stage finished");
                    (StageResult::completed(stage.name(), text), true)
                }
                exhausted @ InvocationOutcome::Exhausted { .. } => {
                    warn!(stage = stage.name(), "stage failed, storing failure marker");
                    (StageResult::failed(stage.name(), exhausted.into_text()), false)
                }
            };

            session.record_stage(result)?;
            self.listener.on_stage_finished(index, total, stage, succeeded);
        }

        let scores = self.extractor.derive(&self.catalog, &session);
        info!(
            overall = scores.overall.value(),
            questions_scored = scores.questions.len(),
            "scores derived"
        );
        session.complete(scores)?;

        Ok(session)
    }
}
