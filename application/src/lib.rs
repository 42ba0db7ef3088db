//! Application layer for judge-quorum
//!
//! This crate contains the voting use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    agent_invoker::{AgentArgs, AgentInvoker, InvocationError, SideChannel},
    progress::{NoProgress, VoteProgressNotifier},
    vote_logger::{NoVoteEventLogger, VoteEvent, VoteEventLogger},
};
pub use use_cases::run_vote::{QuorumVoter, RunVoteError, VoteRequest};
