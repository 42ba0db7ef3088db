//! Execution parameters for voting round control.
//!
//! [`ExecutionParams`] groups the static parameters that control how a
//! round talks to judges, as opposed to the voting rule itself
//! ([`VotingConfig`](judge_domain::VotingConfig)).

use judge_domain::ExtractionToken;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Voting round control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Timeout for each judge invocation; `None` waits indefinitely.
    pub invocation_timeout: Option<Duration>,
    /// Default marker separating reasoning from the vote.
    pub extraction_token: ExtractionToken,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            invocation_timeout: Some(Duration::from_secs(120)),
            extraction_token: ExtractionToken::default(),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_invocation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.invocation_timeout = timeout;
        self
    }

    pub fn with_extraction_token(mut self, token: impl Into<ExtractionToken>) -> Self {
        self.extraction_token = token.into();
        self
    }
}
