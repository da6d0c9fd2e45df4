//! Analysis module - session aggregate, score extraction and text clean-up.
//!
//! # Module Organization
//!
//! - `session` - `AnalysisSession` aggregate and the values it stores
//! - `score_rules` - ordered regex rule sets with explicit match policies
//! - `score_extractor` - overall, dimension and question score lookup
//! - `markup` - heading stripping and display text for answers
//! - `report` - read models for the drill-down and summary views

mod markup;
mod report;
mod score_extractor;
mod score_rules;
mod session;

pub use markup::{answer_display_text, strip_markup, NO_EXPLANATION_PLACEHOLDER};
pub use report::{ExecutiveSummary, QuestionView};
pub use score_extractor::ScoreExtractor;
pub use score_rules::{MatchPolicy, RuleMatch, RuleSet};
pub use session::{
    AnalysisInputs, AnalysisSession, DerivedScores, DimensionScores, StageResult, StageStatus,
};
