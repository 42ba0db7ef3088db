//! Progress reporting for voting rounds

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use judge_application::ports::progress::VoteProgressNotifier;
use judge_domain::{Ballot, Decision};
use std::sync::Mutex;

/// Reports progress during a voting round with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn ballot_message(ballot: &Ballot) -> String {
        match ballot {
            Ballot::Counted(index) => format!("{} candidate {}", "v".green(), index + 1),
            Ballot::Discarded(reason) => format!("{} {}", "x".red(), reason),
        }
    }

    fn decision_message(decision: &Decision) -> String {
        format!(
            "candidate {} by {}",
            decision.winner_index + 1,
            decision.resolution
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteProgressNotifier for ProgressReporter {
    fn on_round_start(&self, judge: &str, total_votes: usize) {
        let pb = ProgressBar::new(total_votes as u64);
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Judge {}", judge));
        pb.set_message("Waiting for votes...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_ballot(&self, ballot: &Ballot) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::ballot_message(ballot));
            pb.inc(1);
        }
    }

    fn on_decision(&self, decision: &Decision) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{}",
                Self::decision_message(decision).green()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
///
/// Used when stderr is not a terminal.
pub struct SimpleProgress;

impl SimpleProgress {
    fn round_start_line(judge: &str, total_votes: usize) -> String {
        format!(
            "{} {} ({} votes)",
            "->".cyan(),
            format!("Judge {}", judge).bold(),
            total_votes
        )
    }

    fn ballot_line(ballot: &Ballot) -> String {
        format!("  {}", ProgressReporter::ballot_message(ballot))
    }

    fn decision_line(decision: &Decision) -> String {
        format!("  {}", ProgressReporter::decision_message(decision).bold())
    }
}

impl VoteProgressNotifier for SimpleProgress {
    fn on_round_start(&self, judge: &str, total_votes: usize) {
        eprintln!("{}", Self::round_start_line(judge, total_votes));
    }

    fn on_ballot(&self, ballot: &Ballot) {
        eprintln!("{}", Self::ballot_line(ballot));
    }

    fn on_decision(&self, decision: &Decision) {
        eprintln!("{}", Self::decision_line(decision));
    }
}
