//! Progress notification port
//!
//! Defines the interface for reporting progress during a voting round.

use judge_domain::{Ballot, Decision};

/// Callback for progress updates during a voting round
///
/// Implementations live in the presentation layer. Ballots are reported
/// in completion order, from the single task that owns the tally.
pub trait VoteProgressNotifier: Send + Sync {
    /// Called once the invocations have been launched
    fn on_round_start(&self, judge: &str, total_votes: usize);

    /// Called for every ballot processed before the decision
    fn on_ballot(&self, ballot: &Ballot);

    /// Called when the round is decided
    fn on_decision(&self, decision: &Decision);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl VoteProgressNotifier for NoProgress {
    fn on_round_start(&self, _judge: &str, _total_votes: usize) {}
    fn on_ballot(&self, _ballot: &Ballot) {}
    fn on_decision(&self, _decision: &Decision) {}
}
