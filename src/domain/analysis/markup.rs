//! Text clean-up for stage outputs.
//!
//! `strip_markup` runs on every stage output before it is stored.
//! `answer_display_text` additionally removes score statements from a
//! question answer so the prose can be shown next to a separate score badge.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shown when nothing but score statements remained in an answer.
pub const NO_EXPLANATION_PLACEHOLDER: &str =
    "No detailed explanation available beyond the score assessment.";

static HEADER_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s*").unwrap());

static SCORE_STATEMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // standalone lines
        r"(?im)^Score:\s*\d+(?:\.\d+)?\s*/\s*5\s*$",
        r"(?im)^Score\s*\(?0[–-]5\)?\s*:\s*\d+(?:\.\d+)?\s*$",
        r"(?im)^Overall Score:\s*\d+(?:\.\d+)?\s*$",
        r"(?im)^Rating:\s*\d+(?:\.\d+)?\s*$",
        r"(?im)^\d+(?:\.\d+)?\s*out of\s*5\s*$",
        r"(?im)^\d+(?:\.\d+)?\s*/\s*5\s*$",
        // trailing mentions
        r"(?im)\s*Score:\s*\d+(?:\.\d+)?\s*/\s*5\s*$",
        r"(?im)\s*Score\s*\(?0[–-]5\)?\s*:\s*\d+(?:\.\d+)?\s*$",
        r"(?im)\s*Overall Score:\s*\d+(?:\.\d+)?\s*$",
        // bracketed
        r"(?i)\(\s*Score:\s*\d+(?:\.\d+)?\s*/\s*5\s*\)",
        r"(?i)\(\s*\d+(?:\.\d+)?\s*/\s*5\s*\)",
        r"(?i)\[\s*\d+(?:\.\d+)?\s*/\s*5\s*\]",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Openings of justification paragraphs that only restate the score.
static SCORE_ONLY_JUSTIFICATIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Justification:\s*(?:The\s+)?score\s+(?:of\s+)?\d+(?:\.\d+)?",
        r"(?i)Justification:\s*(?:This\s+)?(?:results?\s+in\s+a\s+)?score\s+of\s+\d+(?:\.\d+)?",
        r"(?i)Justification:\s*\d+(?:\.\d+)?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static SECTION_LABELS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Explanation|Analysis|Key Findings|Summary|Conclusion|Recommendation|Justification|Rationale):",
    )
    .unwrap()
});

/// Removes heading markers at the start of every line and trims.
///
/// Repeats until nothing changes, so `strip_markup(strip_markup(x)) == strip_markup(x)`.
pub fn strip_markup(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = HEADER_MARKERS.replace_all(&current, "").trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Prose of a question answer with score statements removed and section labels emphasised.
pub fn answer_display_text(text: &str) -> String {
    let mut body = text.to_string();

    for pattern in SCORE_STATEMENTS.iter() {
        body = pattern.replace_all(&body, "").into_owned();
    }
    for opening in SCORE_ONLY_JUSTIFICATIONS.iter() {
        body = remove_paragraphs(&body, opening);
    }

    let body = BLANK_RUNS.replace_all(&body, "\n\n");
    let body = body.trim();
    if body.is_empty() {
        return NO_EXPLANATION_PLACEHOLDER.to_string();
    }

    SECTION_LABELS.replace_all(body, "**${1}:**").into_owned()
}

/// Removes every paragraph that starts with `opening`.
fn remove_paragraphs(text: &str, opening: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(found) = opening.find_at(text, cursor) {
        out.push_str(&text[cursor..found.start()]);
        cursor = paragraph_end(text, found.end());
    }
    out.push_str(&text[cursor..]);
    out
}

/// First position at or after `from` where a blank line or a new line
/// starting with a letter begins, or the end of the text (ignoring one
/// trailing newline).
fn paragraph_end(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        if bytes[pos] == b'\n' {
            match bytes.get(pos + 1) {
                None | Some(b'\n') => return pos,
                Some(next) if next.is_ascii_alphabetic() => return pos,
                _ => {}
            }
        }
        pos += 1;
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strip_removes_headers_on_every_line() {
        let text = "## Vocabulary\n- churn\n### Terms\n- ARPU\n";
        assert_eq!(strip_markup(text), "Vocabulary\n- churn\nTerms\n- ARPU");
    }

    #[test]
    fn strip_empty_is_empty() {
        assert_eq!(strip_markup(""), "");
        assert_eq!(strip_markup("   \n  "), "");
    }

    #[test]
    fn strip_handles_stacked_markers() {
        assert_eq!(strip_markup("####### Deep"), "Deep");
        assert_eq!(strip_markup("  # # Title"), "Title");
    }

    #[test]
    fn strip_keeps_inline_hashes() {
        assert_eq!(strip_markup("Issue #42 is open"), "Issue #42 is open");
    }

    #[test]
    fn display_removes_standalone_score_line() {
        let text = "Explanation: Inputs change weekly.\nScore: 4/5";
        assert_eq!(
            answer_display_text(text),
            "**Explanation:** Inputs change weekly."
        );
    }

    #[test]
    fn display_removes_bracketed_scores() {
        let text = "Demand shifts often (4/5) and pricing too [3/5].";
        assert_eq!(answer_display_text(text), "Demand shifts often  and pricing too .");
    }

    #[test]
    fn display_removes_score_only_justification() {
        let text = "Analysis: Suppliers are tightly coupled.\n\nJustification: The score of 4 reflects this.\n\nConclusion: Plan for it.";
        assert_eq!(
            answer_display_text(text),
            "**Analysis:** Suppliers are tightly coupled.\n\n**Conclusion:** Plan for it."
        );
    }

    #[test]
    fn display_keeps_substantive_justification() {
        let text = "Justification: stakeholders disagree on what churn means.";
        assert_eq!(
            answer_display_text(text),
            "**Justification:** stakeholders disagree on what churn means."
        );
    }

    #[test]
    fn display_placeholder_when_only_scores() {
        assert_eq!(answer_display_text("Score: 3/5"), NO_EXPLANATION_PLACEHOLDER);
        assert_eq!(answer_display_text("Score (0–5): 2"), NO_EXPLANATION_PLACEHOLDER);
        assert_eq!(answer_display_text(""), NO_EXPLANATION_PLACEHOLDER);
    }

    #[test]
    fn display_collapses_blank_runs() {
        let text = "First point.\n\n\n   \nSecond point.";
        assert_eq!(answer_display_text(text), "First point.\n\nSecond point.");
    }

    #[test]
    fn paragraph_end_stops_at_capitalised_line() {
        let text = "Justification: 3 because\nOther text";
        assert_eq!(paragraph_end(text, 15), 24);
    }

    #[test]
    fn paragraph_end_ignores_continuation_lines() {
        let text = "Justification: 3\n- bullet\n\nNext";
        assert_eq!(paragraph_end(text, 15), 25);
    }

    proptest! {
        #[test]
        fn strip_is_idempotent(text in "[#a-zA-Z \\n\\t]{0,64}") {
            let once = strip_markup(&text);
            prop_assert_eq!(strip_markup(&once), once);
        }
    }
}
