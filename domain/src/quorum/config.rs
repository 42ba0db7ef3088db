//! Voting configuration

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Parameters of one voting round
///
/// - `judge_name`: agent invoked for every vote
/// - `number_of_votes`: redundant invocations of that judge
/// - `winning_vote_count`: quorum that ends the round early
///
/// A quorum larger than the number of votes is accepted: it can never be
/// reached, so the round always resolves by plurality.
///
/// # Example
///
/// ```
/// use judge_domain::quorum::VotingConfig;
///
/// let config = VotingConfig::default();
/// assert_eq!(config.number_of_votes, 3);
/// assert_eq!(config.winning_vote_count, 2);
/// assert!(config.validate().is_ok());
///
/// let unreachable = VotingConfig::new("judge", 3, 5);
/// assert!(unreachable.validate().is_ok());
/// assert!(!unreachable.quorum_reachable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingConfig {
    pub judge_name: String,
    pub number_of_votes: usize,
    pub winning_vote_count: usize,
}

impl VotingConfig {
    pub const DEFAULT_JUDGE: &'static str = "discriminator";
    pub const DEFAULT_NUMBER_OF_VOTES: usize = 3;
    pub const DEFAULT_WINNING_VOTE_COUNT: usize = 2;

    pub fn new(
        judge_name: impl Into<String>,
        number_of_votes: usize,
        winning_vote_count: usize,
    ) -> Self {
        Self {
            judge_name: judge_name.into(),
            number_of_votes,
            winning_vote_count,
        }
    }

    pub fn with_judge(mut self, judge_name: impl Into<String>) -> Self {
        self.judge_name = judge_name.into();
        self
    }

    pub fn with_number_of_votes(mut self, number_of_votes: usize) -> Self {
        self.number_of_votes = number_of_votes;
        self
    }

    pub fn with_winning_vote_count(mut self, winning_vote_count: usize) -> Self {
        self.winning_vote_count = winning_vote_count;
        self
    }

    /// Reject configurations that cannot run a round at all
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.judge_name.trim().is_empty() {
            return Err(DomainError::invalid_input("judge name cannot be empty"));
        }
        if self.number_of_votes == 0 {
            return Err(DomainError::invalid_input(
                "number_of_votes must be greater than 0",
            ));
        }
        if self.winning_vote_count == 0 {
            return Err(DomainError::invalid_input(
                "winning_vote_count must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Whether a single candidate can collect `winning_vote_count` votes
    pub fn quorum_reachable(&self) -> bool {
        self.winning_vote_count <= self.number_of_votes
    }
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_JUDGE,
            Self::DEFAULT_NUMBER_OF_VOTES,
            Self::DEFAULT_WINNING_VOTE_COUNT,
        )
    }
}
