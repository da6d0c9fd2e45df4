//! Navigation between result views.
//!
//! Moves are never errors: an illegal request comes back as a
//! [`NavigationOutcome::Rejected`] carrying a warning for the caller to show.

use serde::Serialize;
use std::fmt;

use crate::domain::analysis::AnalysisSession;
use crate::domain::foundation::{Dimension, StateMachine};

use super::view_state::ViewState;

/// Why a navigation request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationWarning {
    /// Results were requested before the analysis finished.
    AnalysisIncomplete { target: ViewState },
    /// The move is not in the transition table.
    InvalidTransition { from: ViewState, to: ViewState },
}

impl fmt::Display for NavigationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationWarning::AnalysisIncomplete { target } => {
                write!(f, "Run the analysis before opening the {} view.", target)
            }
            NavigationWarning::InvalidTransition { from, to } => {
                write!(f, "Cannot go from {} to {}.", from, to)
            }
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Moved { from: ViewState, to: ViewState },
    DimensionSelected { dimension: Dimension },
    Unchanged,
    Rejected { warning: NavigationWarning },
}

impl NavigationOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, NavigationOutcome::Rejected { .. })
    }

    pub fn warning(&self) -> Option<&NavigationWarning> {
        match self {
            NavigationOutcome::Rejected { warning } => Some(warning),
            _ => None,
        }
    }
}

/// Current view plus the dimension selected for drill-down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStateMachine {
    state: ViewState,
    selected_dimension: Option<Dimension>,
}

impl NavigationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Selected dimension; only set while in the drill-down view.
    pub fn selected_dimension(&self) -> Option<Dimension> {
        match self.state {
            ViewState::DimensionDrilldown => self.selected_dimension,
            _ => None,
        }
    }

    /// Requests a move to `target`.
    pub fn goto(&mut self, target: ViewState, session: &AnalysisSession) -> NavigationOutcome {
        if target.requires_completed_analysis() && !session.is_completed() {
            self.state = ViewState::Input;
            self.selected_dimension = None;
            tracing::warn!(target_view = %target, "navigation rejected, analysis incomplete");
            return NavigationOutcome::Rejected {
                warning: NavigationWarning::AnalysisIncomplete { target },
            };
        }

        if target == self.state {
            return NavigationOutcome::Unchanged;
        }

        match self.state.transition_to(target) {
            Ok(next) => {
                let from = self.state;
                self.state = next;
                if matches!(next, ViewState::Overview | ViewState::Input) {
                    self.selected_dimension = None;
                }
                tracing::debug!(from = %from, to = %next, "view changed");
                NavigationOutcome::Moved { from, to: next }
            }
            Err(_) => {
                tracing::warn!(from = %self.state, to = %target, "navigation rejected, invalid transition");
                NavigationOutcome::Rejected {
                    warning: NavigationWarning::InvalidTransition {
                        from: self.state,
                        to: target,
                    },
                }
            }
        }
    }

    /// Selects a dimension, entering the drill-down view from the overview.
    ///
    /// Inside the drill-down only the selection changes.
    pub fn select_dimension(
        &mut self,
        dimension: Dimension,
        session: &AnalysisSession,
    ) -> NavigationOutcome {
        if self.state == ViewState::DimensionDrilldown && session.is_completed() {
            self.selected_dimension = Some(dimension);
            return NavigationOutcome::DimensionSelected { dimension };
        }

        let outcome = self.goto(ViewState::DimensionDrilldown, session);
        if let NavigationOutcome::Moved { .. } = outcome {
            self.selected_dimension = Some(dimension);
        }
        outcome
    }

    /// Returns to the input view and clears the session.
    pub fn reset(&mut self, session: &mut AnalysisSession) {
        self.state = ViewState::Input;
        self.selected_dimension = None;
        session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{AnalysisInputs, DerivedScores, StageResult};

    fn completed_session() -> AnalysisSession {
        let mut session = AnalysisSession::begin(AnalysisInputs::new("THD", "Retail", "p"));
        session
            .record_stage(StageResult::completed("hardness_summary", "Overall Difficulty Score = 3.10"))
            .unwrap();
        session.complete(DerivedScores::default()).unwrap();
        session
    }

    #[test]
    fn starts_at_input() {
        let nav = NavigationStateMachine::new();
        assert_eq!(nav.state(), ViewState::Input);
        assert_eq!(nav.selected_dimension(), None);
    }

    #[test]
    fn summary_without_completed_session_is_rejected() {
        let mut nav = NavigationStateMachine::new();
        let session = AnalysisSession::default();

        let outcome = nav.goto(ViewState::Summary, &session);

        assert_eq!(nav.state(), ViewState::Input);
        assert_eq!(
            outcome.warning(),
            Some(&NavigationWarning::AnalysisIncomplete {
                target: ViewState::Summary
            })
        );
    }

    #[test]
    fn forward_through_all_views() {
        let mut nav = NavigationStateMachine::new();
        let session = completed_session();

        assert!(matches!(nav.goto(ViewState::Overview, &session), NavigationOutcome::Moved { .. }));
        assert!(matches!(
            nav.select_dimension(Dimension::Uncertainty, &session),
            NavigationOutcome::Moved { .. }
        ));
        assert_eq!(nav.selected_dimension(), Some(Dimension::Uncertainty));
        assert!(matches!(nav.goto(ViewState::Summary, &session), NavigationOutcome::Moved { .. }));
        assert_eq!(nav.state(), ViewState::Summary);
    }

    #[test]
    fn selection_survives_summary_round_trip() {
        let mut nav = NavigationStateMachine::new();
        let session = completed_session();
        nav.goto(ViewState::Overview, &session);
        nav.select_dimension(Dimension::Ambiguity, &session);
        nav.goto(ViewState::Summary, &session);
        nav.goto(ViewState::DimensionDrilldown, &session);

        assert_eq!(nav.selected_dimension(), Some(Dimension::Ambiguity));
    }

    #[test]
    fn selecting_inside_drilldown_only_changes_selection() {
        let mut nav = NavigationStateMachine::new();
        let session = completed_session();
        nav.goto(ViewState::Overview, &session);
        nav.select_dimension(Dimension::Volatility, &session);

        let outcome = nav.select_dimension(Dimension::Interconnectedness, &session);

        assert_eq!(
            outcome,
            NavigationOutcome::DimensionSelected {
                dimension: Dimension::Interconnectedness
            }
        );
        assert_eq!(nav.state(), ViewState::DimensionDrilldown);
        assert_eq!(nav.selected_dimension(), Some(Dimension::Interconnectedness));
    }

    #[test]
    fn leaving_drilldown_for_overview_clears_selection() {
        let mut nav = NavigationStateMachine::new();
        let session = completed_session();
        nav.goto(ViewState::Overview, &session);
        nav.select_dimension(Dimension::Volatility, &session);
        nav.goto(ViewState::Overview, &session);
        nav.goto(ViewState::DimensionDrilldown, &session);

        assert_eq!(nav.selected_dimension(), None);
    }

    #[test]
    fn invalid_jump_keeps_state() {
        let mut nav = NavigationStateMachine::new();
        let session = completed_session();

        let outcome = nav.goto(ViewState::Summary, &session);

        assert!(outcome.is_rejected());
        assert_eq!(nav.state(), ViewState::Input);
        assert_eq!(
            outcome.warning().map(|w| w.to_string()),
            Some("Cannot go from Input to Summary.".to_string())
        );
    }

    #[test]
    fn goto_current_state_is_unchanged() {
        let mut nav = NavigationStateMachine::new();
        assert_eq!(
            nav.goto(ViewState::Input, &AnalysisSession::default()),
            NavigationOutcome::Unchanged
        );
    }

    #[test]
    fn select_dimension_from_input_is_rejected() {
        let mut nav = NavigationStateMachine::new();
        let outcome = nav.select_dimension(Dimension::Volatility, &AnalysisSession::default());
        assert!(outcome.is_rejected());
        assert_eq!(nav.selected_dimension(), None);
    }

    #[test]
    fn reset_clears_session_and_returns_to_input() {
        let mut nav = NavigationStateMachine::new();
        let mut session = completed_session();
        nav.goto(ViewState::Overview, &session);
        nav.select_dimension(Dimension::Volatility, &session);

        nav.reset(&mut session);

        assert_eq!(nav.state(), ViewState::Input);
        assert_eq!(nav.selected_dimension(), None);
        assert_eq!(session, AnalysisSession::default());
    }
}
