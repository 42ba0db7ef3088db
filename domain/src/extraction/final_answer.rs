//! Final-answer extraction from free-form judge responses.
//!
//! Judges reason in prose and finish with a marker line (`VOTE: 2`). These
//! functions recover the text after the marker and coerce it into a
//! candidate index, degrading gracefully on malformed output.

use crate::quorum::DiscardReason;

/// Extract the final answer that follows the last occurrence of `token`.
///
/// Lines are scanned bottom-up; the first line (from the bottom) that
/// contains the token decides, and within that line the *last* occurrence
/// is used. Matching ignores case, the returned text keeps its original
/// casing and is trimmed.
///
/// Without any occurrence (or with a blank token) the last non-empty line
/// is returned. Empty input yields an empty string.
///
/// # Examples
///
/// ```
/// use judge_domain::extraction::extract_final;
///
/// assert_eq!(extract_final("reasoning...\nVOTE: 2", "vote:"), "2");
/// assert_eq!(extract_final("Vote: ABC", "vote:"), "ABC");
/// assert_eq!(extract_final("no token here", "vote:"), "no token here");
/// assert_eq!(extract_final("", "vote:"), "");
/// ```
pub fn extract_final(text: &str, token: &str) -> String {
    if !token.trim().is_empty() {
        for line in text.lines().rev() {
            if let Some(end) = rfind_ignore_case(line, token) {
                return line[end..].trim().to_string();
            }
        }
    }

    last_non_empty_line(text).unwrap_or_default().to_string()
}

/// Coerce extracted text into a 0-based candidate index.
///
/// The text must be an integer (optionally signed) naming a candidate in
/// the 1-based display numbering `[1, candidates]`.
///
/// # Examples
///
/// ```
/// use judge_domain::extraction::parse_vote_index;
/// use judge_domain::quorum::DiscardReason;
///
/// assert_eq!(parse_vote_index("2", 3), Ok(1));
/// assert!(matches!(parse_vote_index("4", 3), Err(DiscardReason::OutOfRange { .. })));
/// assert!(matches!(parse_vote_index("two", 3), Err(DiscardReason::Unparseable { .. })));
/// ```
pub fn parse_vote_index(extracted: &str, candidates: usize) -> Result<usize, DiscardReason> {
    let trimmed = extracted.trim();
    let index: i64 = trimmed
        .parse()
        .map_err(|_| DiscardReason::Unparseable {
            text: trimmed.to_string(),
        })?;

    if index < 1 || index as u64 > candidates as u64 {
        return Err(DiscardReason::OutOfRange { index, candidates });
    }

    Ok(index as usize - 1)
}

fn last_non_empty_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|line| !line.is_empty())
}

/// Byte offset just past the last case-insensitive occurrence of `needle`.
///
/// Case folding is done per character so offsets always refer to the
/// original haystack, even when lowercasing changes a character's width.
fn rfind_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .char_indices()
        .rev()
        .find_map(|(start, _)| match_ignore_case(&haystack[start..], needle).map(|len| start + len))
}

/// Length in bytes of the prefix of `s` matching `needle` ignoring case.
fn match_ignore_case(s: &str, needle: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = s.chars();
    for expected in needle.chars() {
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}
