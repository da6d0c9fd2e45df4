//! Prompt builders for the standard stages.

use super::stage::{PriorOutputs, StageKind};
use super::stage_catalog::{CURRENT_SYSTEM, QUESTION_NAMES, VOCABULARY};

pub fn vocabulary_prompt(_kind: &StageKind, problem: &str, _prior: &PriorOutputs<'_>) -> String {
    format!("{}\n\nExtract the vocabulary from this problem statement.", problem)
}

pub fn current_system_prompt(_kind: &StageKind, problem: &str, prior: &PriorOutputs<'_>) -> String {
    format!(
        "Problem statement - {}\n\nContext from vocabulary:\n{}\n\nDescribe the current system, inputs, outputs, and pain points.",
        problem,
        prior.get(VOCABULARY)
    )
}

pub fn question_prompt(kind: &StageKind, problem: &str, prior: &PriorOutputs<'_>) -> String {
    let number = match kind {
        StageKind::Question { number, .. } => *number,
        _ => 0,
    };
    format!(
        "Problem statement - {}\n\nContext from Current System:\n{}\n\nQ{}. Provide detailed analysis, score 0–5, and justification.",
        problem,
        prior.get(CURRENT_SYSTEM),
        number
    )
}

pub fn hardness_summary_prompt(
    _kind: &StageKind,
    problem: &str,
    prior: &PriorOutputs<'_>,
) -> String {
    let mut context = format!("Current System:\n{}\n", prior.get(CURRENT_SYSTEM));
    for name in QUESTION_NAMES {
        context.push_str(&format!("{}:\n{}\n", name, prior.get(name)));
    }
    format!(
        "Problem statement - {}\n\nContext from all previous analysis:\n{}\nProvide Hardness Score, Level, Summary & Key Takeaways.",
        problem, context
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Dimension;

    #[test]
    fn vocabulary_prompt_appends_instruction() {
        let prompt = vocabulary_prompt(&StageKind::Vocabulary, "Churn is rising", &PriorOutputs::default());
        assert_eq!(
            prompt,
            "Churn is rising\n\nExtract the vocabulary from this problem statement."
        );
    }

    #[test]
    fn current_system_prompt_uses_vocabulary_context() {
        let prior = PriorOutputs::new([(VOCABULARY, "churn: customers leaving")]);
        let prompt = current_system_prompt(&StageKind::CurrentSystem, "P", &prior);
        assert_eq!(
            prompt,
            "Problem statement - P\n\nContext from vocabulary:\nchurn: customers leaving\n\nDescribe the current system, inputs, outputs, and pain points."
        );
    }

    #[test]
    fn question_prompt_numbers_the_question() {
        let prior = PriorOutputs::new([(CURRENT_SYSTEM, "CRM + billing")]);
        let kind = StageKind::Question {
            number: 7,
            dimension: Dimension::Interconnectedness,
        };
        let prompt = question_prompt(&kind, "P", &prior);
        assert!(prompt.starts_with("Problem statement - P\n\nContext from Current System:\nCRM + billing"));
        assert!(prompt.ends_with("Q7. Provide detailed analysis, score 0–5, and justification."));
    }

    #[test]
    fn question_prompt_with_missing_context_is_empty_section() {
        let kind = StageKind::Question {
            number: 1,
            dimension: Dimension::Volatility,
        };
        let prompt = question_prompt(&kind, "P", &PriorOutputs::default());
        assert!(prompt.contains("Context from Current System:\n\n\nQ1."));
    }

    #[test]
    fn summary_prompt_lists_every_question_in_order() {
        let prior = PriorOutputs::new([(CURRENT_SYSTEM, "cs"), ("Q1", "a1"), ("Q12", "a12")]);
        let prompt = hardness_summary_prompt(&StageKind::HardnessSummary, "P", &prior);

        assert!(prompt.contains("Current System:\ncs\nQ1:\na1\nQ2:\n\nQ3:"));
        let q9 = prompt.find("Q9:").unwrap();
        let q10 = prompt.find("Q10:").unwrap();
        assert!(q9 < q10);
        assert!(prompt.ends_with("Q12:\na12\n\nProvide Hardness Score, Level, Summary & Key Takeaways."));
    }
}
