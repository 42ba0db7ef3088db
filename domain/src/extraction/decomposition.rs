//! Decomposition extraction: `P1=[...], P2=[...], C=[...]` triples.
//!
//! A decomposing judge splits a problem into two subproblems (`P1`, `P2`)
//! and a combinator (`C`). The fields are smuggled through free text as
//! labeled brackets; this module recovers them into a canonical line and
//! back into typed fields.

use super::final_answer::extract_final;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Literal used in the canonical line for a label that did not match
const ABSENT: &str = "None";

static LABELED_BRACKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\b(P1|P2|C)\s*=\s*(\[.*?\])").expect("labeled bracket pattern is valid")
});

/// Recover a canonical decomposition line from a judge response.
///
/// Every `LABEL = [ ... ]` occurrence for `P1`, `P2` and `C` is collected
/// (non-greedy, across lines); when a label appears more than once the last
/// occurrence wins. If at least one label matched, the single-line canonical
/// form `P1=[..], P2=[..], C=[..]` is returned with `None` for missing labels.
/// Line breaks and whitespace runs inside a field collapse to one space.
///
/// Otherwise the final answer (see [`extract_final`]) is returned verbatim
/// when it already contains both `P1=` and `C=`. `None` means the response
/// could not be decomposed; it is not an error.
///
/// # Examples
///
/// ```
/// use judge_domain::extraction::extract_decomposition;
///
/// assert_eq!(
///     extract_decomposition("P1=[a], P2=[b], C=[combine]", "vote:").as_deref(),
///     Some("P1=[a], P2=[b], C=[combine]"),
/// );
/// assert_eq!(extract_decomposition("nothing to see", "vote:"), None);
/// ```
pub fn extract_decomposition(text: &str, token: &str) -> Option<String> {
    let mut fields: [Option<&str>; 3] = [None, None, None];
    let mut matched = false;

    for caps in LABELED_BRACKET.captures_iter(text) {
        let slot = match &caps[1] {
            "P1" => 0,
            "P2" => 1,
            _ => 2,
        };
        fields[slot] = caps.get(2).map(|m| m.as_str());
        matched = true;
    }

    if matched {
        let [first, second, combinator] = fields.map(canonical_field);
        return Some(format!("P1=[{first}], P2=[{second}], C=[{combinator}]"));
    }

    let answer = extract_final(text, token);
    if answer.contains("P1=") && answer.contains("C=") {
        Some(answer)
    } else {
        None
    }
}

/// Strip one layer of enclosing brackets and map the literal `None` to absent.
///
/// # Examples
///
/// ```
/// use judge_domain::extraction::parse_bracketed_field;
///
/// assert_eq!(parse_bracketed_field("[solve left half]").as_deref(), Some("solve left half"));
/// assert_eq!(parse_bracketed_field("[[nested]]").as_deref(), Some("[nested]"));
/// assert_eq!(parse_bracketed_field("None"), None);
/// ```
pub fn parse_bracketed_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();

    if inner.is_empty() || inner == ABSENT {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Field content for the canonical line, whitespace runs folded to one space
fn canonical_field(bracketed: Option<&str>) -> String {
    bracketed
        .and_then(parse_bracketed_field)
        .map(|field| field.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_else(|| ABSENT.to_string())
}

/// Typed view of a canonical decomposition line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// First subproblem (`P1`)
    pub first: Option<String>,
    /// Second subproblem (`P2`)
    pub second: Option<String>,
    /// How the two sub-answers are combined (`C`)
    pub combinator: Option<String>,
}

impl Decomposition {
    /// Parse a line produced by [`extract_decomposition`].
    ///
    /// Returns `None` when no labeled field is present at all.
    pub fn from_canonical(line: &str) -> Option<Self> {
        let mut decomposition = Self::default();
        let mut matched = false;

        for caps in LABELED_BRACKET.captures_iter(line) {
            let value = parse_bracketed_field(&caps[2]);
            match &caps[1] {
                "P1" => decomposition.first = value,
                "P2" => decomposition.second = value,
                _ => decomposition.combinator = value,
            }
            matched = true;
        }

        matched.then_some(decomposition)
    }

    /// Both subproblems and the combinator are present
    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some() && self.combinator.is_some()
    }
}

impl std::fmt::Display for Decomposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| ABSENT.to_string());
        write!(
            f,
            "P1=[{}], P2=[{}], C=[{}]",
            field(&self.first),
            field(&self.second),
            field(&self.combinator)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== extract_decomposition Tests ====================

    #[test]
    fn test_canonical_input_round_trips() {
        let text = "P1=[a], P2=[b], C=[combine]";
        assert_eq!(extract_decomposition(text, "vote:").as_deref(), Some(text));
    }

    #[test]
    fn test_fields_spread_over_lines() {
        let text = "Let me split this.\nP1 = [count the red\nballs]\nP2 = [count the blue balls]\nC = [add]";
        assert_eq!(
            extract_decomposition(text, "vote:").as_deref(),
            Some("P1=[count the red balls], P2=[count the blue balls], C=[add]")
        );
    }

    #[test]
    fn test_canonical_line_is_single_line() {
        let text = "P1 = [count the red\nballs]\nP2=[b]\nC=[add\r\n  then   halve]";
        let line = extract_decomposition(text, "vote:").unwrap();
        assert!(!line.contains('\n'));
        assert!(!line.contains('\r'));
        assert_eq!(line, "P1=[count the red balls], P2=[b], C=[add then halve]");
    }

    #[test]
    fn test_missing_labels_become_none() {
        assert_eq!(
            extract_decomposition("Only P1=[left half] is needed", "vote:").as_deref(),
            Some("P1=[left half], P2=[None], C=[None]")
        );
    }

    #[test]
    fn test_last_occurrence_wins() {
        let text = "Draft: P1=[x], C=[y]\nRevised: P1=[x2], P2=[z], C=[y2]";
        assert_eq!(
            extract_decomposition(text, "vote:").as_deref(),
            Some("P1=[x2], P2=[z], C=[y2]")
        );
    }

    #[test]
    fn test_label_requires_word_boundary() {
        // "ABC=[...]" must not be read as a C label
        assert_eq!(extract_decomposition("ABC=[nope]", "vote:"), None);
    }

    #[test]
    fn test_fallback_to_final_answer() {
        let text = "thinking\nVOTE: P1=left, P2=right, C=sum";
        assert_eq!(
            extract_decomposition(text, "vote:").as_deref(),
            Some("P1=left, P2=right, C=sum")
        );
    }

    #[test]
    fn test_no_decomposition() {
        assert_eq!(extract_decomposition("nothing to see", "vote:"), None);
        assert_eq!(extract_decomposition("", "vote:"), None);
        // P1= without C= in the final answer is not enough
        assert_eq!(extract_decomposition("VOTE: P1=only", "vote:"), None);
    }

    // ==================== parse_bracketed_field Tests ====================

    #[test]
    fn test_parse_bracketed_field() {
        assert_eq!(parse_bracketed_field("[a]").as_deref(), Some("a"));
        assert_eq!(parse_bracketed_field("  [ spaced ]  ").as_deref(), Some("spaced"));
        assert_eq!(parse_bracketed_field("plain").as_deref(), Some("plain"));
        assert_eq!(parse_bracketed_field("[half").as_deref(), Some("[half"));
        assert_eq!(parse_bracketed_field("[None]"), None);
        assert_eq!(parse_bracketed_field("None"), None);
        assert_eq!(parse_bracketed_field("[]"), None);
    }

    // ==================== Decomposition Tests ====================

    #[test]
    fn test_from_canonical() {
        let parsed = Decomposition::from_canonical("P1=[a], P2=[None], C=[combine]").unwrap();
        assert_eq!(parsed.first.as_deref(), Some("a"));
        assert_eq!(parsed.second, None);
        assert_eq!(parsed.combinator.as_deref(), Some("combine"));
        assert!(!parsed.is_complete());
        assert_eq!(parsed.to_string(), "P1=[a], P2=[None], C=[combine]");
    }

    #[test]
    fn test_from_canonical_without_fields() {
        assert_eq!(Decomposition::from_canonical("P1=left, C=sum"), None);
    }

    #[test]
    fn test_extract_then_parse() {
        let line = extract_decomposition("P1=[sort], P2=[dedupe], C=[concat]", "vote:").unwrap();
        let parsed = Decomposition::from_canonical(&line).unwrap();
        assert!(parsed.is_complete());
    }
}
