//! Quorum voting domain
//!
//! Types for deciding between candidate answers by redundant judge votes.
//!
//! ```text
//! CandidateSet ──► JudgePayload ──► N judge responses
//!                                        │ extract_final + parse_vote_index
//!                                        ▼
//!                                     Ballot ──► VoteTally ──► Decision
//!                                   (Counted /                 (Quorum /
//!                                    Discarded)                 Plurality)
//! ```

pub mod candidate;
pub mod config;
pub mod decision;
pub mod tally;
pub mod vote;

pub use candidate::CandidateSet;
pub use config::VotingConfig;
pub use decision::{Decision, Resolution};
pub use tally::VoteTally;
pub use vote::{Ballot, DiscardReason};
