//! Infrastructure layer for judge-quorum
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: agent transports, the vote transcript logger, and
//! configuration file loading.

pub mod config;
pub mod invoker;
pub mod logging;

// Re-export commonly used types
pub use config::{
    AgentTransport, ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig,
    FileLoggingConfig, FileVotingConfig,
};
#[cfg(feature = "http")]
pub use invoker::HttpAgentInvoker;
pub use invoker::{CommandAgent, LocalAgent, LocalAgentInvoker, RoutingInvoker, SessionRegistry};
pub use logging::JsonlVoteEventLogger;
