//! Voting decision

use super::tally::VoteTally;
use serde::{Deserialize, Serialize};

/// How a decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// A candidate reached the winning vote count before all votes arrived
    Quorum,
    /// No quorum; the highest tally won (lowest index on ties)
    Plurality,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Quorum => "quorum",
            Resolution::Plurality => "plurality",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one voting round
///
/// The tally holds only the votes counted when the decision was taken;
/// ballots that would have arrived later are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub tally: VoteTally,
    pub winner_index: usize,
    pub resolution: Resolution,
    /// Ballots that produced a vote
    pub counted: usize,
    /// Ballots discarded as malformed or failed
    pub discarded: usize,
}

impl Decision {
    /// Decision taken as soon as `winner_index` reached quorum
    pub fn quorum(tally: VoteTally, winner_index: usize, discarded: usize) -> Self {
        let counted = tally.total() as usize;
        Self {
            tally,
            winner_index,
            resolution: Resolution::Quorum,
            counted,
            discarded,
        }
    }

    /// Decision by highest tally after every invocation finished
    pub fn plurality(tally: VoteTally, discarded: usize) -> Self {
        let counted = tally.total() as usize;
        let winner_index = tally.leader();
        Self {
            tally,
            winner_index,
            resolution: Resolution::Plurality,
            counted,
            discarded,
        }
    }

    pub fn reached_quorum(&self) -> bool {
        self.resolution == Resolution::Quorum
    }

    /// Votes received by the winner
    pub fn winner_votes(&self) -> u32 {
        self.tally.count(self.winner_index)
    }
}
