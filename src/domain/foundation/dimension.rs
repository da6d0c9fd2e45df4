//! The four complexity dimensions questions are grouped under.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Complexity dimension. Each one aggregates three question stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Volatility,
    Ambiguity,
    Interconnectedness,
    Uncertainty,
}

impl Dimension {
    /// All dimensions in presentation order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Volatility,
        Dimension::Ambiguity,
        Dimension::Interconnectedness,
        Dimension::Uncertainty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Volatility => "Volatility",
            Dimension::Ambiguity => "Ambiguity",
            Dimension::Interconnectedness => "Interconnectedness",
            Dimension::Uncertainty => "Uncertainty",
        }
    }

    /// Single-letter code used in short-form score lines, e.g. `Volatility (V): 3.0`.
    pub fn letter(&self) -> char {
        match self {
            Dimension::Volatility => 'V',
            Dimension::Ambiguity => 'A',
            Dimension::Interconnectedness => 'I',
            Dimension::Uncertainty => 'U',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Dimension::Volatility => "Measures the frequency and pace of change in key business inputs",
            Dimension::Ambiguity => {
                "Assesses clarity of definitions, objectives, and stakeholder understanding"
            }
            Dimension::Interconnectedness => {
                "Evaluates the complexity of system dependencies and relationships"
            }
            Dimension::Uncertainty => {
                "Analyzes predictability, feedback mechanisms, and validation standards"
            }
        }
    }

    /// Position in [`Dimension::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Dimension::Volatility => 0,
            Dimension::Ambiguity => 1,
            Dimension::Interconnectedness => 2,
            Dimension::Uncertainty => 3,
        }
    }

    /// Focus recommendation for a dimension score: low ≤ 3, medium ≤ 4, high above.
    pub fn focus_recommendation(&self, score: f64) -> &'static str {
        let band = if score <= 3.0 {
            0
        } else if score <= 4.0 {
            1
        } else {
            2
        };

        let table: [&'static str; 3] = match self {
            Dimension::Volatility => [
                "Monitor change patterns and maintain current adaptability measures.",
                "Develop contingency plans for moderate frequency changes.",
                "Implement robust change management and rapid response systems.",
            ],
            Dimension::Ambiguity => [
                "Continue with clear communication protocols.",
                "Enhance requirement documentation and stakeholder alignment.",
                "Implement rigorous clarification processes and validation frameworks.",
            ],
            Dimension::Interconnectedness => [
                "Maintain current system integration levels.",
                "Strengthen cross-functional communication channels.",
                "Develop comprehensive system mapping and dependency management.",
            ],
            Dimension::Uncertainty => [
                "Continue with current decision-making frameworks.",
                "Enhance data collection and scenario planning.",
                "Implement advanced forecasting and risk management systems.",
            ],
        };
        table[band]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dimension {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|d| {
                d.name().eq_ignore_ascii_case(trimmed)
                    || (trimmed.len() == 1
                        && trimmed.chars().all(|c| c.eq_ignore_ascii_case(&d.letter())))
            })
            .ok_or_else(|| ValidationError::invalid_format("dimension", format!("unknown dimension '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (position, dimension) in Dimension::ALL.iter().enumerate() {
            assert_eq!(dimension.index(), position);
        }
    }

    #[test]
    fn parses_names_and_letters() {
        assert_eq!("volatility".parse::<Dimension>().unwrap(), Dimension::Volatility);
        assert_eq!("I".parse::<Dimension>().unwrap(), Dimension::Interconnectedness);
        assert_eq!(" u ".parse::<Dimension>().unwrap(), Dimension::Uncertainty);
        assert!("clarity".parse::<Dimension>().is_err());
    }

    #[test]
    fn focus_recommendation_bands() {
        let d = Dimension::Volatility;
        assert_eq!(
            d.focus_recommendation(3.0),
            "Monitor change patterns and maintain current adaptability measures."
        );
        assert_eq!(
            d.focus_recommendation(3.5),
            "Develop contingency plans for moderate frequency changes."
        );
        assert_eq!(
            d.focus_recommendation(4.5),
            "Implement robust change management and rapid response systems."
        );
    }
}
