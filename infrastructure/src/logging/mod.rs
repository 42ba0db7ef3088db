//! Logging infrastructure: structured vote transcripts.
//!
//! Provides [`JsonlVoteEventLogger`], a JSONL file writer that implements
//! the [`VoteEventLogger`](judge_application::VoteEventLogger) port.

mod jsonl_vote_logger;

pub use jsonl_vote_logger::JsonlVoteEventLogger;
