//! Bounded difficulty score and its classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty score on the closed interval [0, 5].
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    /// Creates a score, clamping the value into [0, 5]. NaN becomes 0.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Classifies this score into a difficulty level.
    pub fn level(&self) -> DifficultyLevel {
        DifficultyLevel::classify(self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Coarse difficulty bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    Moderate,
    Hard,
}

impl DifficultyLevel {
    /// `≤ 3.0` is Easy, `≤ 4.0` is Moderate, anything higher is Hard.
    pub fn classify(score: f64) -> Self {
        if score <= 3.0 {
            DifficultyLevel::Easy
        } else if score <= 4.0 {
            DifficultyLevel::Moderate
        } else {
            DifficultyLevel::Hard
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Moderate => "Moderate",
            DifficultyLevel::Hard => "Hard",
        }
    }

    /// Overall recommendation shown with the executive summary.
    pub fn recommendation(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => {
                "This problem can be addressed with standard solutions and minimal organizational changes."
            }
            DifficultyLevel::Moderate => {
                "This problem requires careful planning and may involve cross-functional coordination."
            }
            DifficultyLevel::Hard => {
                "This problem demands significant organizational changes and strategic intervention."
            }
        }
    }

    /// Concrete actions accompanying the recommendation.
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            DifficultyLevel::Easy => &[
                "Implementing best practices",
                "Leveraging existing frameworks",
                "Minimal process adjustments",
            ],
            DifficultyLevel::Moderate => &[
                "Structured project management",
                "Cross-departmental collaboration",
                "Phased implementation approach",
            ],
            DifficultyLevel::Hard => &[
                "Executive sponsorship and oversight",
                "Comprehensive change management",
                "Significant resource allocation",
                "Long-term strategic planning",
            ],
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
