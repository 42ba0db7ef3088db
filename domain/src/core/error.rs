//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only precondition violations surface as errors. Per-invocation problems
/// (unparseable responses, transport failures) are modelled as discarded
/// ballots, see [`crate::quorum::DiscardReason`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Shorthand for building an [`DomainError::InvalidInput`]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }
}
