//! Ordered pattern rules for pulling a number out of free text.
//!
//! A [`RuleSet`] is a priority-ordered list of regexes, each with one capture
//! group holding the number, plus a [`MatchPolicy`] deciding which of several
//! candidate matches is used.

use regex::Regex;
use std::ops::RangeInclusive;

/// How a rule set picks among matching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Rules are tried in priority order; the first match of the first matching rule wins.
    FirstRule,
    /// Every match of every rule is a candidate; the one starting latest in the text wins.
    /// Ties go to the higher-priority rule.
    LatestInText,
}

/// A single named pattern with one numeric capture group.
#[derive(Debug, Clone)]
struct ScoreRule {
    name: &'static str,
    pattern: Regex,
}

/// A number found by a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub value: f64,
    /// Byte offset of the captured number.
    pub position: usize,
    pub rule: &'static str,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ScoreRule>,
    policy: MatchPolicy,
    accepted: Option<RangeInclusive<f64>>,
}

impl RuleSet {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            rules: Vec::new(),
            policy,
            accepted: None,
        }
    }

    /// Adds a rule at the lowest priority so far.
    ///
    /// Patterns are compiled case-insensitively. Panics on an invalid pattern,
    /// so only pass literals and escaped fragments.
    pub fn rule(mut self, name: &'static str, pattern: &str) -> Self {
        let pattern = Regex::new(&format!("(?i){}", pattern))
            .unwrap_or_else(|err| panic!("invalid score rule '{}': {}", name, err));
        self.rules.push(ScoreRule { name, pattern });
        self
    }

    /// Discards candidate values outside `range`.
    pub fn accepting(mut self, range: RangeInclusive<f64>) -> Self {
        self.accepted = Some(range);
        self
    }

    pub fn evaluate(&self, text: &str) -> Option<RuleMatch> {
        match self.policy {
            MatchPolicy::FirstRule => self
                .rules
                .iter()
                .find_map(|rule| self.candidates(rule, text).next()),
            MatchPolicy::LatestInText => self
                .rules
                .iter()
                .flat_map(|rule| self.candidates(rule, text))
                .fold(None, |best: Option<RuleMatch>, candidate| match best {
                    Some(current) if current.position >= candidate.position => Some(current),
                    _ => Some(candidate),
                }),
        }
    }

    fn candidates<'a>(
        &'a self,
        rule: &'a ScoreRule,
        text: &'a str,
    ) -> impl Iterator<Item = RuleMatch> + 'a {
        rule.pattern.captures_iter(text).filter_map(move |caps| {
            let number = caps.get(1)?;
            let value: f64 = number.as_str().parse().ok()?;
            if let Some(range) = &self.accepted {
                if !range.contains(&value) {
                    return None;
                }
            }
            Some(RuleMatch {
                value,
                position: number.start(),
                rule: rule.name,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rule_prefers_priority_over_position() {
        let rules = RuleSet::new(MatchPolicy::FirstRule)
            .rule("final", r"Final:\s*(\d+\.\d+)")
            .rule("any", r"(\d+\.\d+)");

        let found = rules.evaluate("1.5 then 2.5 then Final: 3.5 and 4.5").unwrap();
        assert_eq!(found.value, 3.5);
        assert_eq!(found.rule, "final");
    }

    #[test]
    fn first_rule_takes_first_occurrence_of_winning_rule() {
        let rules = RuleSet::new(MatchPolicy::FirstRule).rule("any", r"(\d+\.\d+)");
        assert_eq!(rules.evaluate("2.0 and 3.0").unwrap().value, 2.0);
    }

    #[test]
    fn latest_in_text_picks_last_position() {
        let rules = RuleSet::new(MatchPolicy::LatestInText)
            .rule("label", r"Score:\s*(\d+)")
            .rule("of", r"score of\s*(\d+)");

        let found = rules.evaluate("score of 2 first, later Score: 4").unwrap();
        assert_eq!(found.value, 4.0);
        assert_eq!(found.rule, "label");
    }

    #[test]
    fn latest_in_text_tie_goes_to_earlier_rule() {
        let rules = RuleSet::new(MatchPolicy::LatestInText)
            .rule("specific", r"Score:\s*(\d+)")
            .rule("generic", r"Score.*?(\d+)");

        assert_eq!(rules.evaluate("Score: 3").unwrap().rule, "specific");
    }

    #[test]
    fn accepting_discards_out_of_range() {
        let rules = RuleSet::new(MatchPolicy::LatestInText)
            .rule("n", r"(\d+)")
            .accepting(0.0..=5.0);

        assert_eq!(rules.evaluate("3 then 12").unwrap().value, 3.0);
        assert!(rules.evaluate("9 and 42").is_none());
    }

    #[test]
    fn rules_are_case_insensitive() {
        let rules = RuleSet::new(MatchPolicy::FirstRule).rule("s", r"score:\s*(\d+)");
        assert_eq!(rules.evaluate("SCORE: 2").unwrap().value, 2.0);
    }

    #[test]
    fn no_match_is_none() {
        let rules = RuleSet::new(MatchPolicy::FirstRule).rule("s", r"Score:\s*(\d+)");
        assert!(rules.evaluate("nothing numeric here").is_none());
    }
}
