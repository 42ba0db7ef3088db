//! Output formatter trait

use judge_domain::Decision;
use serde::Serialize;

/// Everything needed to render the outcome of one voting round
#[derive(Debug, Clone, Serialize)]
pub struct VoteReport<'a> {
    pub problem: &'a str,
    pub judge: &'a str,
    pub candidates: &'a [String],
    pub decision: &'a Decision,
}

impl VoteReport<'_> {
    /// Text of the winning candidate
    pub fn winner(&self) -> &str {
        self.candidates
            .get(self.decision.winner_index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Trait for formatting voting results
pub trait OutputFormatter {
    /// Format the complete result
    fn format(&self, report: &VoteReport<'_>) -> String;

    /// Format as JSON
    fn format_json(&self, report: &VoteReport<'_>) -> String;

    /// Format the winning candidate only
    fn format_winner(&self, report: &VoteReport<'_>) -> String;
}
