//! Analysis session aggregate.
//!
//! One session records a single analysis run: the inputs it started from,
//! each stage's cleaned output in catalog order and the scores derived once
//! every stage has produced an output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::PriorOutputs;
use crate::domain::foundation::{
    DifficultyLevel, Dimension, DomainError, ErrorCode, Score, ValidationError,
};

use super::markup::strip_markup;

/// What the analysis was asked about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInputs {
    pub customer: String,
    pub industry: String,
    pub problem_text: String,
}

impl AnalysisInputs {
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

    /// Rejects inputs no stage could be prompted with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer.trim().is_empty() {
            return Err(ValidationError::empty_field("customer"));
        }
        if self.problem_text.trim().is_empty() {
            return Err(ValidationError::empty_field("problem_text"));
        }
        Ok(())
    }
}

/// Whether a stage produced real output or the failure marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Failed,
}

/// Output of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage_name: String,
    pub raw_text: String,
    pub cleaned_text: String,
    pub status: StageStatus,
}

impl StageResult {
    pub fn completed(stage_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self::with_status(stage_name, raw_text, StageStatus::Completed)
    }

    pub fn failed(stage_name: impl Into<String>, marker: impl Into<String>) -> Self {
        Self::with_status(stage_name, marker, StageStatus::Failed)
    }

    fn with_status(
        stage_name: impl Into<String>,
        raw_text: impl Into<String>,
        status: StageStatus,
    ) -> Self {
        let raw_text = raw_text.into();
        Self {
            stage_name: stage_name.into(),
            cleaned_text: strip_markup(&raw_text),
            raw_text,
            status,
        }
    }
}

/// Scores for the four dimensions, each in [0, 5].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    values: [Score; 4],
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Score {
        self.values[dimension.index()]
    }

    pub fn set(&mut self, dimension: Dimension, score: Score) {
        self.values[dimension.index()] = score;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Score)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }

    /// Unweighted mean of the four scores.
    pub fn mean(&self) -> f64 {
        self.values.iter().map(Score::value).sum::<f64>() / self.values.len() as f64
    }

    /// Highest-scoring dimension; ties go to the earlier one in [`Dimension::ALL`].
    pub fn highest(&self) -> (Dimension, Score) {
        self.iter()
            .fold(None, |best: Option<(Dimension, Score)>, (d, s)| match best {
                Some((_, top)) if top.value() >= s.value() => best,
                _ => Some((d, s)),
            })
            .unwrap_or((Dimension::Volatility, Score::default()))
    }

    /// Lowest-scoring dimension; ties go to the earlier one in [`Dimension::ALL`].
    pub fn lowest(&self) -> (Dimension, Score) {
        self.iter()
            .fold(None, |best: Option<(Dimension, Score)>, (d, s)| match best {
                Some((_, low)) if low.value() <= s.value() => best,
                _ => Some((d, s)),
            })
            .unwrap_or((Dimension::Volatility, Score::default()))
    }
}

/// Everything the extractor derives from a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedScores {
    pub overall: Score,
    pub dimensions: DimensionScores,
    pub questions: IndexMap<String, Score>,
}

/// One analysis run.
///
/// # Invariants
///
/// - `stage_outputs` only grows, in catalog order, one entry per stage
/// - nothing is recorded once `completed` is set
/// - scores stay at their defaults until completion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    inputs: AnalysisInputs,
    stage_outputs: IndexMap<String, StageResult>,
    overall_score: Score,
    dimension_scores: DimensionScores,
    question_scores: IndexMap<String, Score>,
    completed: bool,
}

impl AnalysisSession {
    /// Starts a fresh session for the given inputs.
    pub fn begin(inputs: AnalysisInputs) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn inputs(&self) -> &AnalysisInputs {
        &self.inputs
    }

    pub fn problem_text(&self) -> &str {
        &self.inputs.problem_text
    }

    pub fn customer(&self) -> &str {
        &self.inputs.customer
    }

    pub fn industry(&self) -> &str {
        &self.inputs.industry
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Cleaned output of a stage, if it has run.
    pub fn output(&self, stage_name: &str) -> Option<&str> {
        self.stage_outputs
            .get(stage_name)
            .map(|result| result.cleaned_text.as_str())
    }

    pub fn stage_result(&self, stage_name: &str) -> Option<&StageResult> {
        self.stage_outputs.get(stage_name)
    }

    /// `(stage name, cleaned output)` pairs in the order they were recorded.
    pub fn stage_outputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stage_outputs
            .iter()
            .map(|(name, result)| (name.as_str(), result.cleaned_text.as_str()))
    }

    pub fn stage_count(&self) -> usize {
        self.stage_outputs.len()
    }

    /// Names of stages whose output is the failure marker.
    pub fn failed_stages(&self) -> Vec<&str> {
        self.stage_outputs
            .values()
            .filter(|result| result.status == StageStatus::Failed)
            .map(|result| result.stage_name.as_str())
            .collect()
    }

    /// Read-only view handed to prompt builders.
    pub fn prior_outputs(&self) -> PriorOutputs<'_> {
        PriorOutputs::new(self.stage_outputs())
    }

    pub fn overall_score(&self) -> Score {
        self.overall_score
    }

    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.overall_score.level()
    }

    pub fn dimension_scores(&self) -> &DimensionScores {
        &self.dimension_scores
    }

    /// Score of a question stage, absent when none could be extracted.
    pub fn question_score(&self, stage_name: &str) -> Option<Score> {
        self.question_scores.get(stage_name).copied()
    }

    pub fn question_scores(&self) -> &IndexMap<String, Score> {
        &self.question_scores
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the output of the next stage.
    ///
    /// # Errors
    ///
    /// - `AnalysisAlreadyCompleted` if the session is complete
    /// - `DuplicateStageOutput` if the stage already has an output
    pub fn record_stage(&mut self, result: StageResult) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.stage_outputs.contains_key(&result.stage_name) {
            return Err(DomainError::new(
                ErrorCode::DuplicateStageOutput,
                format!("Stage '{}' already has an output", result.stage_name),
            )
            .with_detail("stage", result.stage_name));
        }
        self.stage_outputs.insert(result.stage_name.clone(), result);
        Ok(())
    }

    /// Stores the derived scores and marks the session complete.
    ///
    /// # Errors
    ///
    /// - `AnalysisAlreadyCompleted` if called twice
    /// - `AnalysisIncomplete` if no stage output was recorded
    pub fn complete(&mut self, scores: DerivedScores) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.stage_outputs.is_empty() {
            return Err(DomainError::new(
                ErrorCode::AnalysisIncomplete,
                "Cannot complete an analysis without stage outputs",
            ));
        }
        self.overall_score = scores.overall;
        self.dimension_scores = scores.dimensions;
        self.question_scores = scores.questions;
        self.completed = true;
        Ok(())
    }

    /// Restores the just-constructed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.completed {
            return Err(DomainError::new(
                ErrorCode::AnalysisAlreadyCompleted,
                "Analysis is already complete",
            ));
        }
        Ok(())
    }
}
