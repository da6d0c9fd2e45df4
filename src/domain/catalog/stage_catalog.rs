//! The ordered, validated list of pipeline stages.

use std::collections::HashSet;

use crate::domain::foundation::{Dimension, ValidationError};

use super::prompts::{current_system_prompt, hardness_summary_prompt, question_prompt, vocabulary_prompt};
use super::stage::{EndpointTemplate, StageDefinition, StageKind};

pub const VOCABULARY: &str = "vocabulary";
pub const CURRENT_SYSTEM: &str = "current_system";
pub const HARDNESS_SUMMARY: &str = "hardness_summary";
pub const QUESTION_NAMES: [&str; 12] = [
    "Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7", "Q8", "Q9", "Q10", "Q11", "Q12",
];

/// Questions per dimension.
pub const QUESTIONS_PER_DIMENSION: usize = 3;

const VOCABULARY_AGENCY: &str = "1758548233201";
const CURRENT_SYSTEM_AGENCY: &str = "1758549095254";
const HARDNESS_SUMMARY_AGENCY: &str = "1758619658634";

/// `(agency id, description)` per question, Q1 first.
const QUESTIONS: [(&str, &str); 12] = [
    ("1758555344231", "Q1. What is the frequency and pace of change in the key inputs driving the business?"),
    ("1758549615986", "Q2. To what extent are these changes cyclical and predictable versus sporadic and unpredictable?"),
    ("1758614550482", "Q3. How resilient is the current system in absorbing these changes without requiring significant rework or disruption?"),
    ("1758614809984", "Q4. To what extent do stakeholders share a common understanding of the key terms and concepts?"),
    ("1758615038050", "Q5. Are there any conflicting definitions or interpretations that could create confusion?"),
    ("1758615386880", "Q6. Are objectives, priorities, and constraints clearly communicated and well-defined?"),
    ("1758615778653", "Q7. To what extent are key inputs interdependent?"),
    ("1758616081630", "Q8. How well are the governing rules, functions, and relationships between inputs understood?"),
    ("1758616793510", "Q9. Are there any hidden or latent dependencies that could impact outcomes?"),
    ("1758617140479", "Q10. Are there hidden or latent dependencies that could affect outcomes?"),
    ("1758618137301", "Q11. Are feedback loops insufficient or missing, limiting our ability to adapt?"),
    ("1758619317968", "Q12. Do we lack established benchmarks or 'gold standards' to validate results?"),
];

/// A dimension with the names of its question stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionGroup {
    pub dimension: Dimension,
    pub stage_names: Vec<String>,
}

/// Immutable, ordered stage list. Order is execution order.
#[derive(Debug, Clone)]
pub struct StageCatalog {
    stages: Vec<StageDefinition>,
}

impl StageCatalog {
    /// Creates a catalog after checking its structural invariants.
    pub fn new(stages: Vec<StageDefinition>) -> Result<Self, ValidationError> {
        let catalog = Self { stages };
        catalog.validate()?;
        Ok(catalog)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(stages: Vec<StageDefinition>) -> Self {
        Self { stages }
    }

    /// The standard analysis pipeline against the given service endpoint.
    pub fn standard(template: &EndpointTemplate) -> Self {
        let mut stages = Vec::with_capacity(QUESTIONS.len() + 3);

        stages.push(StageDefinition::new(
            VOCABULARY,
            template.url_for(VOCABULARY_AGENCY),
            3,
            "Extract Vocabulary",
            StageKind::Vocabulary,
            vocabulary_prompt,
        ));
        stages.push(StageDefinition::new(
            CURRENT_SYSTEM,
            template.url_for(CURRENT_SYSTEM_AGENCY),
            2,
            "Describe Current System",
            StageKind::CurrentSystem,
            current_system_prompt,
        ));

        for (index, (agency, description)) in QUESTIONS.iter().enumerate() {
            let dimension = Dimension::ALL[index / QUESTIONS_PER_DIMENSION];
            stages.push(StageDefinition::new(
                QUESTION_NAMES[index],
                template.url_for(agency),
                2,
                *description,
                StageKind::Question {
                    number: (index + 1) as u8,
                    dimension,
                },
                question_prompt,
            ));
        }

        stages.push(StageDefinition::new(
            HARDNESS_SUMMARY,
            template.url_for(HARDNESS_SUMMARY_AGENCY),
            2,
            "Hardness Level, Summary & Key Takeaways",
            StageKind::HardnessSummary,
            hardness_summary_prompt,
        ));

        Self { stages }
    }

    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageDefinition> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// The stage whose output carries the overall and dimension scores.
    pub fn summary_stage(&self) -> Option<&StageDefinition> {
        self.stages
            .iter()
            .find(|s| matches!(s.kind(), StageKind::HardnessSummary))
    }

    /// Question stages in catalog order.
    pub fn question_stages(&self) -> impl Iterator<Item = &StageDefinition> {
        self.stages.iter().filter(|s| s.kind().is_question())
    }

    /// Question stages categorised under one dimension.
    pub fn questions_for(&self, dimension: Dimension) -> Vec<&StageDefinition> {
        self.question_stages()
            .filter(|s| s.kind().dimension() == Some(dimension))
            .collect()
    }

    pub fn dimension_groups(&self) -> Vec<DimensionGroup> {
        Dimension::ALL
            .iter()
            .map(|dimension| DimensionGroup {
                dimension: *dimension,
                stage_names: self
                    .questions_for(*dimension)
                    .into_iter()
                    .map(|s| s.name().to_string())
                    .collect(),
            })
            .collect()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.stages.is_empty() {
            return Err(ValidationError::empty_field("stages"));
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            if stage.name().trim().is_empty() {
                return Err(ValidationError::empty_field("stage.name"));
            }
            if !seen.insert(stage.name()) {
                return Err(ValidationError::invalid_format(
                    "stages",
                    format!("duplicate stage name '{}'", stage.name()),
                ));
            }
            if stage.round_count() == 0 {
                return Err(ValidationError::out_of_range(
                    format!("{}.round_count", stage.name()),
                    1.0,
                    f64::from(u32::MAX),
                    0.0,
                ));
            }
        }

        let summaries = self
            .stages
            .iter()
            .filter(|s| matches!(s.kind(), StageKind::HardnessSummary))
            .count();
        if summaries != 1 {
            return Err(ValidationError::invalid_format(
                "stages",
                format!("expected exactly one hardness summary stage, found {}", summaries),
            ));
        }

        for group in self.dimension_groups() {
            if group.stage_names.len() != QUESTIONS_PER_DIMENSION {
                return Err(ValidationError::invalid_format(
                    "stages",
                    format!(
                        "dimension {} has {} question stages, expected {}",
                        group.dimension,
                        group.stage_names.len(),
                        QUESTIONS_PER_DIMENSION
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::stage::PriorOutputs;

    fn template() -> EndpointTemplate {
        EndpointTemplate {
            base_url: "https://reasoning.test/api".to_string(),
            society_id: "1757657318406".to_string(),
            level: 1,
        }
    }

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = StageCatalog::standard(&template());
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn standard_catalog_order() {
        let catalog = StageCatalog::standard(&template());
        let names: Vec<&str> = catalog.iter().map(|s| s.name()).collect();

        assert_eq!(names.first(), Some(&VOCABULARY));
        assert_eq!(names.get(1), Some(&CURRENT_SYSTEM));
        assert_eq!(&names[2..14], &QUESTION_NAMES[..]);
        assert_eq!(names.last(), Some(&HARDNESS_SUMMARY));
        assert_eq!(catalog.len(), 15);
    }

    #[test]
    fn round_counts() {
        let catalog = StageCatalog::standard(&template());
        assert_eq!(catalog.get(VOCABULARY).unwrap().round_count(), 3);
        assert!(catalog
            .iter()
            .filter(|s| s.name() != VOCABULARY)
            .all(|s| s.round_count() == 2));
    }

    #[test]
    fn endpoints_carry_agency_ids() {
        let catalog = StageCatalog::standard(&template());
        assert_eq!(
            catalog.get("Q1").unwrap().endpoint(),
            "https://reasoning.test/api?society_id=1757657318406&agency_id=1758555344231&level=1"
        );
        assert!(catalog
            .get(HARDNESS_SUMMARY)
            .unwrap()
            .endpoint()
            .contains("agency_id=1758619658634"));
    }

    #[test]
    fn dimension_groups_partition_questions() {
        let catalog = StageCatalog::standard(&template());
        let groups = catalog.dimension_groups();

        assert_eq!(groups[0].dimension, Dimension::Volatility);
        assert_eq!(groups[0].stage_names, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(groups[1].stage_names, vec!["Q4", "Q5", "Q6"]);
        assert_eq!(groups[2].stage_names, vec!["Q7", "Q8", "Q9"]);
        assert_eq!(groups[3].dimension, Dimension::Uncertainty);
        assert_eq!(groups[3].stage_names, vec!["Q10", "Q11", "Q12"]);
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let mut stages = StageCatalog::standard(&template()).stages().to_vec();
        stages.push(stages[0].clone());
        assert!(StageCatalog::new(stages).is_err());
    }

    #[test]
    fn new_rejects_zero_rounds() {
        let mut stages = StageCatalog::standard(&template()).stages().to_vec();
        stages[0] = StageDefinition::new(
            VOCABULARY,
            "https://x",
            0,
            "Extract Vocabulary",
            StageKind::Vocabulary,
            vocabulary_prompt,
        );
        assert!(StageCatalog::new(stages).is_err());
    }

    #[test]
    fn new_rejects_missing_summary() {
        let mut stages = StageCatalog::standard(&template()).stages().to_vec();
        stages.pop();
        assert!(StageCatalog::new(stages).is_err());
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(
            StageCatalog::new(Vec::new()).unwrap_err(),
            ValidationError::empty_field("stages")
        );
    }

    #[test]
    fn question_stage_prompts_only_reference_current_system() {
        let catalog = StageCatalog::standard(&template());
        let prior = PriorOutputs::new([(VOCABULARY, "VOCAB"), (CURRENT_SYSTEM, "SYSTEM")]);
        let prompt = catalog.get("Q5").unwrap().build_prompt("P", &prior);

        assert!(prompt.contains("SYSTEM"));
        assert!(!prompt.contains("VOCAB"));
        assert!(prompt.contains("Q5. Provide detailed analysis"));
    }
}
