//! Score extraction from free-text stage outputs.
//!
//! The hardness summary carries the overall score and the four dimension
//! scores; each question answer carries its own score. Phrasing varies from
//! run to run, so every value is looked up through an ordered [`RuleSet`].

use indexmap::IndexMap;

use crate::domain::catalog::StageCatalog;
use crate::domain::foundation::{Dimension, Score};

use super::score_rules::{MatchPolicy, RuleSet};
use super::session::{AnalysisSession, DerivedScores, DimensionScores};

/// Extracts scores from stage outputs. Build once and reuse.
#[derive(Debug, Clone)]
pub struct ScoreExtractor {
    overall: RuleSet,
    dimension_averages: Vec<(Dimension, RuleSet)>,
    dimension_short_forms: Vec<(Dimension, RuleSet)>,
    question: RuleSet,
}

impl ScoreExtractor {
    pub fn new() -> Self {
        Self {
            overall: overall_rules(),
            dimension_averages: Dimension::ALL
                .iter()
                .map(|d| (*d, dimension_average_rules(*d)))
                .collect(),
            dimension_short_forms: Dimension::ALL
                .iter()
                .map(|d| (*d, dimension_short_form_rules(*d)))
                .collect(),
            question: question_rules(),
        }
    }

    /// Overall difficulty score from the hardness summary.
    ///
    /// Falls back to the mean of the dimension scores when no rule matches.
    pub fn extract_overall_score(&self, summary: &str) -> Score {
        match self.overall.evaluate(summary) {
            Some(found) => Score::clamped(found.value),
            None => Score::clamped(self.extract_dimension_scores(summary).mean()),
        }
    }

    /// Dimension scores from the hardness summary; unresolved dimensions stay at 0.
    ///
    /// An averaged value of 0 is treated as unresolved and the short forms are tried.
    pub fn extract_dimension_scores(&self, summary: &str) -> DimensionScores {
        let mut scores = DimensionScores::default();
        for dimension in Dimension::ALL {
            let found = rules_for(&self.dimension_averages, dimension)
                .and_then(|rules| rules.evaluate(summary))
                .filter(|found| found.value != 0.0)
                .or_else(|| {
                    rules_for(&self.dimension_short_forms, dimension)
                        .and_then(|rules| rules.evaluate(summary))
                });
            if let Some(found) = found {
                scores.set(dimension, Score::clamped(found.value));
            }
        }
        scores
    }

    /// Score stated in a single question answer, rounded to one decimal.
    ///
    /// The latest valid mention wins; values outside [0, 5] are ignored.
    pub fn extract_question_score(&self, answer: &str) -> Option<Score> {
        self.question
            .evaluate(answer)
            .map(|found| Score::clamped((found.value * 10.0).round() / 10.0))
    }

    /// Derives every score of a finished run.
    pub fn derive(&self, catalog: &StageCatalog, session: &AnalysisSession) -> DerivedScores {
        let mut questions = IndexMap::new();
        for stage in catalog.question_stages() {
            let answer = session.output(stage.name()).unwrap_or_default();
            if let Some(score) = self.extract_question_score(answer) {
                questions.insert(stage.name().to_string(), score);
            }
        }

        let summary = catalog
            .summary_stage()
            .and_then(|stage| session.output(stage.name()))
            .unwrap_or_default();

        let (overall, dimensions) = if summary.is_empty() {
            (Score::default(), DimensionScores::default())
        } else {
            (
                self.extract_overall_score(summary),
                self.extract_dimension_scores(summary),
            )
        };

        DerivedScores {
            overall,
            dimensions,
            questions,
        }
    }
}

impl Default for ScoreExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn rules_for(table: &[(Dimension, RuleSet)], dimension: Dimension) -> Option<&RuleSet> {
    table.iter().find(|(d, _)| *d == dimension).map(|(_, rules)| rules)
}

fn overall_rules() -> RuleSet {
    const N: &str = r"[\d\.]+";
    RuleSet::new(MatchPolicy::FirstRule)
        // computed average
        .rule(
            "sum_over_four",
            &format!(
                r"Overall Difficulty Score\s*=\s*{N}\s*\+\s*{N}\s*\+\s*{N}\s*\+\s*{N}\s*/\s*4\s*=\s*(\d+\.\d+)"
            ),
        )
        .rule(
            "parenthesised_sum_over_four",
            &format!(
                r"Overall.*?Score.*?=\s*\({N}\s*\+\s*{N}\s*\+\s*{N}\s*\+\s*{N}\)\s*/\s*4\s*=\s*(\d+\.\d+)"
            ),
        )
        // labelled assignment
        .rule("labelled_assignment", r"Overall Difficulty Score.*?=\s*(\d+\.\d+)")
        // approximation
        .rule("approximation", r"≈\s*(\d+\.\d+)")
        .rule("labelled_with_level", r"Overall.*?Score.*?(\d+\.\d+)\s*\(.*?\)")
        // generic
        .rule("labelled_expression", r"Overall Difficulty Score.*?=.*?(\d+\.\d+)")
        .rule("overall_difficulty", r"Overall.*?Difficulty.*?Score.*?(\d+\.\d+)")
        .rule("difficulty_score", r"difficulty score.*?(\d+\.\d+)")
        .rule("score_over_five", r"Score.*?(\d+\.\d+)\s*/\s*5")
        .rule("out_of_five", r"(\d+\.\d+)\s*out of\s*5")
        .rule("hardness", r"Hardness[:\s]*(\d+(?:\.\d+)?)")
        .rule("overall_score", r"Overall.*?Score.*?(\d+\.\d+)")
        .rule("difficulty", r"Difficulty[:\s]*(\d+\.\d+)")
        .rule("final_score", r"Final Score[:\s]*(\d+\.\d+)")
}

fn dimension_average_rules(dimension: Dimension) -> RuleSet {
    const N: &str = r"[\d\.]+";
    let name = dimension.name();
    RuleSet::new(MatchPolicy::FirstRule)
        .rule(
            "average_expression",
            &format!(r"Avg {name}\s*=\s*\({N}\s*\+\s*{N}\s*\+\s*{N}\)\s*/\s*3\s*=\s*(\d+\.\d+)"),
        )
        .rule("average_assignment", &format!(r"Avg.*?{name}.*?=\s*(\d+\.\d+)"))
        .rule("average_mention", &format!(r"{name}.*?average.*?(\d+\.\d+)"))
}

fn dimension_short_form_rules(dimension: Dimension) -> RuleSet {
    let name = dimension.name();
    let letter = dimension.letter();
    RuleSet::new(MatchPolicy::FirstRule)
        .rule("name_and_letter", &format!(r"{name}\s*\({letter}\):\s*(\d+\.\d+)"))
        .rule("name_then_letter", &format!(r"{name}.*?{letter}:\s*(\d+\.\d+)"))
        .rule("name_then_number", &format!(r"{name}.*?(\d+\.\d+)"))
        .rule("letter_only", &format!(r"\b{letter}:\s*(\d+\.\d+)"))
}

fn question_rules() -> RuleSet {
    const N: &str = r"(\d+(?:\.\d+)?)";
    RuleSet::new(MatchPolicy::LatestInText)
        .rule("score_range_label", &format!(r"Score\s*\(?0[–-]5\)?\s*:\s*{N}"))
        .rule("score_label", &format!(r"Score:\s*{N}"))
        .rule("score_equals", &format!(r"Score\s*=\s*{N}"))
        .rule("overall_score_label", &format!(r"Overall Score:\s*{N}"))
        .rule("rating_label", &format!(r"Rating:\s*{N}"))
        .rule("out_of_five", &format!(r"{N}\s*out of\s*5"))
        .rule("over_five", &format!(r"{N}\s*/\s*5"))
        .rule("score_over_five", &format!(r"Score.*?{N}\s*/\s*5"))
        .rule("justified_score_of", &format!(r"Justification.*?score of\s*{N}"))
        .rule("score_of", &format!(r"score of\s*{N}"))
        .rule("score_then_number", r"Score.*?(\d+)")
        .rule("rating_of", &format!(r"rating of\s*{N}"))
        .accepting(Score::MIN..=Score::MAX)
}
