//! Result views and the legal moves between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Which result view is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Input,
    Overview,
    DimensionDrilldown,
    Summary,
}

impl ViewState {
    /// True for every view that shows results of a completed analysis.
    pub fn requires_completed_analysis(&self) -> bool {
        !matches!(self, ViewState::Input)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewState::Input => "Input",
            ViewState::Overview => "Analysis",
            ViewState::DimensionDrilldown => "VUIA Dimensions",
            ViewState::Summary => "Summary",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl StateMachine for ViewState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ViewState::*;
        matches!(
            (self, target),
            // Forward
            (Input, Overview)
                | (Overview, DimensionDrilldown)
                | (DimensionDrilldown, Summary)
                // Backward
                | (Overview, Input)
                | (DimensionDrilldown, Overview)
                | (Summary, DimensionDrilldown)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ViewState::*;
        match self {
            Input => vec![Overview],
            Overview => vec![DimensionDrilldown, Input],
            DimensionDrilldown => vec![Summary, Overview],
            Summary => vec![DimensionDrilldown],
        }
    }
}
