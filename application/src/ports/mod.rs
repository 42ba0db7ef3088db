//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters implement.

pub mod agent_invoker;
pub mod progress;
pub mod vote_logger;
