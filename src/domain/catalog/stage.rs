//! Stage definitions - one remote reasoning step of the pipeline.

use serde::Serialize;

use crate::domain::foundation::Dimension;

/// Pure prompt builder: `(kind, problem text, earlier outputs) -> prompt`.
pub type PromptBuilder = fn(&StageKind, &str, &PriorOutputs<'_>) -> String;

/// Closed set of stage kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageKind {
    Vocabulary,
    CurrentSystem,
    Question { number: u8, dimension: Dimension },
    HardnessSummary,
}

impl StageKind {
    pub fn is_question(&self) -> bool {
        matches!(self, StageKind::Question { .. })
    }

    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            StageKind::Question { dimension, .. } => Some(*dimension),
            _ => None,
        }
    }
}

/// Immutable description of one pipeline stage.
#[derive(Clone, Serialize)]
pub struct StageDefinition {
    name: String,
    endpoint: String,
    round_count: u32,
    description: String,
    kind: StageKind,
    #[serde(skip)]
    prompt: PromptBuilder,
}

impl StageDefinition {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        round_count: u32,
        description: impl Into<String>,
        kind: StageKind,
        prompt: PromptBuilder,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            round_count,
            description: description.into(),
            kind,
            prompt,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Number of rounds; `round_count - 1` continuation rounds follow the first call.
    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &StageKind {
        &self.kind
    }

    /// Builds this stage's prompt from the problem text and earlier outputs.
    pub fn build_prompt(&self, problem_text: &str, prior: &PriorOutputs<'_>) -> String {
        (self.prompt)(&self.kind, problem_text, prior)
    }
}

impl std::fmt::Debug for StageDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageDefinition")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("round_count", &self.round_count)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Read-only view of the outputs recorded before the current stage.
///
/// Absent stages read as the empty string.
#[derive(Debug, Clone, Default)]
pub struct PriorOutputs<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> PriorOutputs<'a> {
    pub fn new(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, stage_name: &str) -> &'a str {
        self.entries
            .iter()
            .find(|(name, _)| *name == stage_name)
            .map(|(_, text)| *text)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds stage endpoints from the service base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate {
    pub base_url: String,
    pub society_id: String,
    pub level: u32,
}

impl EndpointTemplate {
    /// `<base>?society_id=<society>&agency_id=<agency>&level=<level>`
    pub fn url_for(&self, agency_id: &str) -> String {
        format!(
            "{}?society_id={}&agency_id={}&level={}",
            self.base_url, self.society_id, agency_id, self.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(kind: &StageKind, problem: &str, prior: &PriorOutputs<'_>) -> String {
        format!("{:?}|{}|{}", kind, problem, prior.get("earlier"))
    }

    #[test]
    fn build_prompt_passes_kind_problem_and_prior() {
        let stage = StageDefinition::new("s", "http://x", 2, "S", StageKind::Vocabulary, echo);
        let prior = PriorOutputs::new([("earlier", "before")]);
        assert_eq!(stage.build_prompt("p", &prior), "Vocabulary|p|before");
    }

    #[test]
    fn prior_outputs_missing_key_is_empty() {
        let prior = PriorOutputs::new([("vocabulary", "terms")]);
        assert_eq!(prior.get("vocabulary"), "terms");
        assert_eq!(prior.get("current_system"), "");
        assert_eq!(prior.len(), 1);
    }

    #[test]
    fn endpoint_template_formats_query() {
        let template = EndpointTemplate {
            base_url: "https://host/api".to_string(),
            society_id: "42".to_string(),
            level: 1,
        };
        assert_eq!(
            template.url_for("777"),
            "https://host/api?society_id=42&agency_id=777&level=1"
        );
    }

    #[test]
    fn question_kind_carries_dimension() {
        let kind = StageKind::Question {
            number: 4,
            dimension: Dimension::Ambiguity,
        };
        assert!(kind.is_question());
        assert_eq!(kind.dimension(), Some(Dimension::Ambiguity));
        assert_eq!(StageKind::HardnessSummary.dimension(), None);
    }
}
