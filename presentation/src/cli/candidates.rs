//! Candidate list input

/// Parse a candidates file.
///
/// A JSON array of strings is taken as-is; anything else is read as one
/// candidate per non-empty line.
pub fn parse_candidates(text: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(text) {
        return list;
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
