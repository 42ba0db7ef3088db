//! Agent invoker port
//!
//! Defines the capability the voter depends on: send structured arguments to
//! a named agent and receive its textual response. Transports (in-process,
//! subprocess, HTTP) live in the infrastructure layer.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Structured arguments passed to an agent
pub type AgentArgs = Map<String, Value>;

/// Out-of-band metadata travelling alongside the arguments
///
/// Transports forward it untouched (e.g. request ids, tracing context).
pub type SideChannel = Map<String, Value>;

/// Errors that can occur while invoking an agent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invocation cancelled")]
    Cancelled,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl InvocationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InvocationError::Timeout)
    }
}

/// Invoke a named agent and receive its raw text response
///
/// Every call is independent: implementations must not require shared
/// mutable state between calls to the same agent. The `cancellation` token
/// is triggered when the caller no longer needs the result; implementations
/// should stop work promptly and must leave themselves usable for later
/// calls. Callers may also drop the returned future at any await point.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(
        &self,
        agent: &str,
        args: &AgentArgs,
        side_channel: &SideChannel,
        cancellation: &CancellationToken,
    ) -> Result<String, InvocationError>;
}
