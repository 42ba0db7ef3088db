//! Console output formatter for voting results

use crate::output::formatter::{OutputFormatter, VoteReport};
use colored::Colorize;
use judge_domain::core::string::preview;
use judge_domain::{Decomposition, Resolution};
use serde_json::json;

/// Width of the vote bar at full tally
const BAR_WIDTH: usize = 20;

/// Candidate text shown per row in the full report
const CANDIDATE_PREVIEW_LEN: usize = 60;

/// Formats voting results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result
    pub fn format(report: &VoteReport<'_>) -> String {
        let decision = report.decision;
        let mut output = String::new();

        output.push_str(&Self::header("Judge Quorum Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Problem:".cyan().bold(), report.problem));
        output.push_str(&format!("{} {}\n", "Judge:".cyan().bold(), report.judge));

        output.push_str(&Self::section_header("Tally"));
        let max = decision.tally.counts().iter().copied().max().unwrap_or(0);
        for (index, candidate) in report.candidates.iter().enumerate() {
            let votes = decision.tally.count(index);
            let row = format!(
                "{:>3}. {:<bar$} {:>2}  {}",
                index + 1,
                Self::bar(votes, max),
                votes,
                preview(candidate, CANDIDATE_PREVIEW_LEN),
                bar = BAR_WIDTH
            );
            if index == decision.winner_index {
                output.push_str(&format!("{}\n", row.green().bold()));
            } else {
                output.push_str(&format!("{}\n", row));
            }
        }

        output.push_str(&Self::section_header("Decision"));
        let resolution = match decision.resolution {
            Resolution::Quorum => "quorum reached".green(),
            Resolution::Plurality => "plurality (no quorum)".yellow(),
        };
        output.push_str(&format!(
            "Candidate {} wins by {} with {} vote(s)\n",
            decision.winner_index + 1,
            resolution,
            decision.winner_votes()
        ));
        output.push_str(&format!(
            "{}\n",
            format!(
                "{} counted, {} discarded",
                decision.counted, decision.discarded
            )
            .dimmed()
        ));

        output.push_str(&format!("\n{}\n", report.winner()));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &VoteReport<'_>) -> String {
        let value = json!({
            "problem": report.problem,
            "judge": report.judge,
            "candidates": report.candidates,
            "winner": report.winner(),
            "decision": report.decision,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the winning candidate only
    pub fn format_winner(report: &VoteReport<'_>) -> String {
        report.winner().to_string()
    }

    /// Format the result of `extract`
    ///
    /// `decomposition` is the line from `extract_decomposition`. It is always
    /// printed as-is; the labeled fields are listed below it when the line
    /// is in bracketed form.
    pub fn format_extraction(final_answer: &str, decomposition: Option<&str>) -> String {
        let mut output = format!("{} {}\n", "Final:".cyan().bold(), final_answer);
        let Some(line) = decomposition else {
            return output;
        };

        output.push_str(&format!("{} {}\n", "Decomposition:".cyan().bold(), line));
        if let Some(fields) = Decomposition::from_canonical(line) {
            let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "(none)".to_string());
            output.push_str(&format!("  P1: {}\n", field(&fields.first)));
            output.push_str(&format!("  P2: {}\n", field(&fields.second)));
            output.push_str(&format!("  C:  {}\n", field(&fields.combinator)));
        }
        output
    }

    fn bar(votes: u32, max: u32) -> String {
        if max == 0 {
            return String::new();
        }
        let filled = (votes as usize * BAR_WIDTH).div_ceil(max as usize);
        "#".repeat(filled)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &VoteReport<'_>) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &VoteReport<'_>) -> String {
        Self::format_json(report)
    }

    fn format_winner(&self, report: &VoteReport<'_>) -> String {
        Self::format_winner(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge_domain::{Decision, VoteTally};

    fn decision() -> Decision {
        let mut tally = VoteTally::new(3);
        tally.record(0);
        tally.record(1);
        tally.record(0);
        Decision::quorum(tally, 0, 1)
    }

    fn candidates() -> Vec<String> {
        vec!["42".into(), "36".into(), "48".into()]
    }

    #[test]
    fn test_format_full() {
        colored::control::set_override(false);
        let decision = decision();
        let candidates = candidates();
        let report = VoteReport {
            problem: "What is 6 * 7?",
            judge: "discriminator",
            candidates: &candidates,
            decision: &decision,
        };

        let output = ConsoleFormatter::format(&report);
        assert!(output.contains("Problem: What is 6 * 7?"));
        assert!(output.contains("Candidate 1 wins by quorum reached with 2 vote(s)"));
        assert!(output.contains("3 counted, 1 discarded"));
        assert!(output.contains(&format!("  1. {}  2  42", "#".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_format_json() {
        let decision = decision();
        let candidates = candidates();
        let report = VoteReport {
            problem: "What is 6 * 7?",
            judge: "discriminator",
            candidates: &candidates,
            decision: &decision,
        };

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&report)).unwrap();
        assert_eq!(value["winner"], "42");
        assert_eq!(value["decision"]["winner_index"], 0);
        assert_eq!(value["decision"]["tally"], json!([2, 1, 0]));
        assert_eq!(value["decision"]["resolution"], "quorum");
    }

    #[test]
    fn test_format_winner() {
        let decision = Decision::plurality(VoteTally::new(3), 2);
        let candidates = candidates();
        let report = VoteReport {
            problem: "p",
            judge: "j",
            candidates: &candidates,
            decision: &decision,
        };

        assert_eq!(ConsoleFormatter::format_winner(&report), "42");
    }

    #[test]
    fn test_format_extraction() {
        colored::control::set_override(false);
        let output =
            ConsoleFormatter::format_extraction("2", Some("P1=[x > 0], P2=[None], C=[and]"));
        assert!(output.contains("Final: 2"));
        assert!(output.contains("Decomposition: P1=[x > 0], P2=[None], C=[and]"));
        assert!(output.contains("  P1: x > 0\n"));
        assert!(output.contains("  P2: (none)\n"));
        assert!(output.contains("  C:  and\n"));

        assert_eq!(
            ConsoleFormatter::format_extraction("2", None),
            "Final: 2\n"
        );
    }

    #[test]
    fn test_format_extraction_unbracketed_line() {
        colored::control::set_override(false);
        let text = "thinking\nVOTE: P1=left, P2=right, C=sum";
        let line = judge_domain::extract_decomposition(text, "vote:");

        let output = ConsoleFormatter::format_extraction("P1=left, P2=right, C=sum", line.as_deref());
        assert_eq!(
            output,
            "Final: P1=left, P2=right, C=sum\nDecomposition: P1=left, P2=right, C=sum\n"
        );
    }

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(ConsoleFormatter::bar(0, 0), "");
        assert_eq!(ConsoleFormatter::bar(2, 2).len(), BAR_WIDTH);
        assert_eq!(ConsoleFormatter::bar(1, 2).len(), BAR_WIDTH / 2);
        assert_eq!(ConsoleFormatter::bar(0, 2), "");
    }
}
