//! AnalysisWorkspace - the single owner of the interactive analysis state.
//!
//! Holds the current session, the view navigator, the input draft and the
//! vocabulary toggle. Display surfaces read from it; they never hold a
//! session of their own.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::application::handlers::{
    AnalysisError, InputWarning, RunAnalysisCommand, RunAnalysisHandler,
};
use crate::domain::analysis::{AnalysisInputs, AnalysisSession, ExecutiveSummary, QuestionView};
use crate::domain::catalog::{StageCatalog, VOCABULARY};
use crate::domain::foundation::{AnalysisId, Dimension};
use crate::domain::navigation::{NavigationOutcome, NavigationStateMachine, ViewState};

/// What happened when an analysis was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    /// A new completed session replaced the old one.
    Completed {
        run_id: AnalysisId,
        failed_stages: Vec<String>,
    },
    /// Inputs were rejected; nothing changed.
    Warning(InputWarning),
    /// The run failed; the session was reset.
    Failed { notice: String },
}

/// Interactive analysis state.
#[derive(Debug, Clone)]
pub struct AnalysisWorkspace {
    catalog: Arc<StageCatalog>,
    draft: AnalysisInputs,
    session: AnalysisSession,
    navigator: NavigationStateMachine,
    show_vocabulary: bool,
}

impl AnalysisWorkspace {
    pub fn new(catalog: Arc<StageCatalog>) -> Self {
        Self {
            catalog,
            draft: AnalysisInputs::default(),
            session: AnalysisSession::default(),
            navigator: NavigationStateMachine::new(),
            show_vocabulary: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn draft(&self) -> &AnalysisInputs {
        &self.draft
    }

    pub fn view(&self) -> ViewState {
        self.navigator.state()
    }

    pub fn selected_dimension(&self) -> Option<Dimension> {
        self.navigator.selected_dimension()
    }

    pub fn is_vocabulary_shown(&self) -> bool {
        self.show_vocabulary
    }

    /// Vocabulary text while the toggle is on and the stage produced output.
    pub fn vocabulary(&self) -> Option<&str> {
        if !self.show_vocabulary {
            return None;
        }
        self.session.output(VOCABULARY).filter(|text| !text.is_empty())
    }

    /// The question views of one dimension, in catalog order.
    pub fn dimension_questions(&self, dimension: Dimension) -> Vec<QuestionView> {
        QuestionView::for_dimension(&self.catalog, &self.session, dimension)
    }

    pub fn executive_summary(&self) -> Option<ExecutiveSummary> {
        ExecutiveSummary::from_session(&self.session)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Updates the input draft.
    ///
    /// A changed customer or problem statement discards the current analysis.
    pub fn update_inputs(
        &mut self,
        customer: impl Into<String>,
        industry: impl Into<String>,
        problem_text: impl Into<String>,
    ) {
        let next = AnalysisInputs::new(customer, industry, problem_text);
        let changed = next.customer != self.draft.customer || next.problem_text != self.draft.problem_text;
        self.draft = next;

        if changed {
            debug!(customer = %self.draft.customer, "inputs changed, discarding analysis");
            self.navigator.reset(&mut self.session);
            self.show_vocabulary = false;
        }
    }

    /// Runs an analysis of the current draft.
    pub async fn analyze(&mut self, handler: &RunAnalysisHandler) -> AnalyzeOutcome {
        let cmd = RunAnalysisCommand::new(
            self.draft.customer.clone(),
            self.draft.industry.clone(),
            self.draft.problem_text.clone(),
        );

        match handler.handle(cmd).await {
            Ok(result) => {
                self.navigator.reset(&mut self.session);
                self.session = result.session;
                self.show_vocabulary = false;
                AnalyzeOutcome::Completed {
                    run_id: result.run_id,
                    failed_stages: result.failed_stages,
                }
            }
            Err(AnalysisError::InvalidInput(warning)) => {
                warn!(%warning, "analysis not started");
                AnalyzeOutcome::Warning(warning)
            }
            Err(err @ AnalysisError::PipelineFailed(_)) => {
                error!(error = %err, "analysis failed, session reset");
                self.navigator.reset(&mut self.session);
                self.show_vocabulary = false;
                AnalyzeOutcome::Failed {
                    notice: format!("An error occurred during analysis: {}", err),
                }
            }
        }
    }

    pub fn navigate(&mut self, target: ViewState) -> NavigationOutcome {
        self.navigator.goto(target, &self.session)
    }

    pub fn select_dimension(&mut self, dimension: Dimension) -> NavigationOutcome {
        self.navigator.select_dimension(dimension, &self.session)
    }

    /// Back to the input view with an empty session. The draft is kept.
    pub fn reset(&mut self) {
        self.navigator.reset(&mut self.session);
        self.show_vocabulary = false;
    }

    /// Toggles the vocabulary panel; no effect before an analysis completes.
    pub fn toggle_vocabulary(&mut self) -> bool {
        if self.session.is_completed() {
            self.show_vocabulary = !self.show_vocabulary;
        }
        self.show_vocabulary
    }
}
