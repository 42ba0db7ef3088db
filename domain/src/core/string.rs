//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// `max_len` is measured in bytes; the cut is moved back to the nearest
/// character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Collapse a multi-line judge response into a single truncated line.
///
/// Used for log messages, where raw responses would otherwise span many lines.
pub fn preview(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate("VOTE: 2", 10), "VOTE: 2");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("candidate answer", 12), "candidate...");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 'é' is 2 bytes: "héllo" = 6 bytes, target = 2 falls inside 'é'
        assert_eq!(truncate("héllo world", 5), "h...");
    }

    #[test]
    fn test_preview_collapses_lines() {
        let response = "Reasoning line one\n\n  line two\nVOTE: 3";
        assert_eq!(preview(response, 100), "Reasoning line one line two VOTE: 3");
        assert_eq!(preview(response, 12), "Reasoning...");
    }
}
