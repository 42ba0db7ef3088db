//! Domain layer for judge-quorum
//!
//! This crate contains the core vocabulary of quorum voting and the text
//! processing that turns judge responses into votes. It has no
//! dependencies on I/O, async runtimes or transports.
//!
//! # Core Concepts
//!
//! ## Quorum Voting
//!
//! The same judge is asked the same question several times. Each response
//! becomes a [`Ballot`]; counted ballots go into a [`VoteTally`]. A round
//! ends early when one candidate reaches the winning vote count
//! ([`Resolution::Quorum`]), otherwise the highest tally wins
//! ([`Resolution::Plurality`]).
//!
//! ## Response Extraction
//!
//! Judges answer in free text ending with a marker line (`VOTE: 2`).
//! [`extract_final`] recovers the answer, [`extract_decomposition`] recovers
//! `P1/P2/C` decomposition triples.

pub mod core;
pub mod extraction;
pub mod prompt;
pub mod quorum;

// Re-export commonly used types
pub use core::error::DomainError;
pub use extraction::{
    Decomposition, ExtractionToken, extract_decomposition, extract_final, parse_bracketed_field,
    parse_vote_index,
};
pub use prompt::{JudgePayload, JudgePromptTemplate};
pub use quorum::{
    Ballot, CandidateSet, Decision, DiscardReason, Resolution, VoteTally, VotingConfig,
};
