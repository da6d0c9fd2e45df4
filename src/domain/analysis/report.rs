//! Read models for the drill-down and summary views.

use serde::Serialize;

use crate::domain::catalog::StageCatalog;
use crate::domain::foundation::{DifficultyLevel, Dimension, Score};

use super::markup::answer_display_text;
use super::session::AnalysisSession;

/// One question as shown under its dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub stage_name: String,
    pub description: String,
    pub display_text: String,
    pub score: Option<Score>,
}

impl QuestionView {
    /// Builds the views for a dimension's questions, in catalog order.
    ///
    /// Questions without an output are skipped.
    pub fn for_dimension(
        catalog: &StageCatalog,
        session: &AnalysisSession,
        dimension: Dimension,
    ) -> Vec<QuestionView> {
        catalog
            .questions_for(dimension)
            .into_iter()
            .filter_map(|stage| {
                let answer = session.output(stage.name()).filter(|text| !text.is_empty())?;
                Some(QuestionView {
                    stage_name: stage.name().to_string(),
                    description: stage.description().to_string(),
                    display_text: answer_display_text(answer),
                    score: session.question_score(stage.name()),
                })
            })
            .collect()
    }
}

/// Headline figures and recommendations for a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub customer: String,
    pub industry: String,
    pub overall_score: Score,
    pub level: DifficultyLevel,
    pub recommendation: &'static str,
    pub actions: &'static [&'static str],
    pub primary_dimension: Dimension,
    pub primary_score: Score,
    pub focus_recommendation: &'static str,
    pub lowest_dimension: Dimension,
    pub average_dimension_score: f64,
    pub max_dimension_score: f64,
    pub min_dimension_score: f64,
}

impl ExecutiveSummary {
    /// Returns `None` until the session is complete.
    pub fn from_session(session: &AnalysisSession) -> Option<Self> {
        if !session.is_completed() {
            return None;
        }

        let dimensions = session.dimension_scores();
        let (primary_dimension, primary_score) = dimensions.highest();
        let (lowest_dimension, lowest_score) = dimensions.lowest();
        let level = session.difficulty_level();

        Some(Self {
            customer: session.customer().to_string(),
            industry: session.industry().to_string(),
            overall_score: session.overall_score(),
            level,
            recommendation: level.recommendation(),
            actions: level.actions(),
            primary_dimension,
            primary_score,
            focus_recommendation: primary_dimension.focus_recommendation(primary_score.value()),
            lowest_dimension,
            average_dimension_score: dimensions.mean(),
            max_dimension_score: primary_score.value(),
            min_dimension_score: lowest_score.value(),
        })
    }
}
