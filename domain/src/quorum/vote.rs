//! Ballot types for quorum voting
//!
//! A ballot is the outcome of a single judge invocation: either a vote for
//! a candidate or a discard that leaves the tally untouched.

use crate::extraction::{extract_final, parse_vote_index};
use serde::{Deserialize, Serialize};

/// Why a judge invocation did not produce a countable vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DiscardReason {
    /// Extracted text is not an integer
    Unparseable { text: String },
    /// Integer outside `[1, candidates]`
    OutOfRange { index: i64, candidates: usize },
    /// The invoker returned an error
    InvocationFailed { message: String },
    /// The invocation exceeded its timeout
    TimedOut,
}

impl DiscardReason {
    /// Malformed response, as opposed to a transport-level failure
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DiscardReason::Unparseable { .. } | DiscardReason::OutOfRange { .. }
        )
    }
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardReason::Unparseable { text } => write!(f, "unparseable vote {:?}", text),
            DiscardReason::OutOfRange { index, candidates } => {
                write!(f, "vote {} outside 1..={}", index, candidates)
            }
            DiscardReason::InvocationFailed { message } => {
                write!(f, "invocation failed: {}", message)
            }
            DiscardReason::TimedOut => write!(f, "invocation timed out"),
        }
    }
}

/// Outcome of one judge invocation
///
/// # Example
///
/// ```
/// use judge_domain::quorum::Ballot;
///
/// let ballot = Ballot::from_response("Candidate 2 is right.\nVOTE: 2", "vote:", 3);
/// assert_eq!(ballot, Ballot::Counted(1));
///
/// let ballot = Ballot::from_response("VOTE: seven", "vote:", 3);
/// assert!(!ballot.is_counted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ballot {
    /// Vote for a 0-based candidate index
    Counted(usize),
    /// Contributes nothing to the tally
    Discarded(DiscardReason),
}

impl Ballot {
    /// Reduce a raw judge response to a ballot
    pub fn from_response(response: &str, token: &str, candidates: usize) -> Self {
        let extracted = extract_final(response, token);
        match parse_vote_index(&extracted, candidates) {
            Ok(index) => Ballot::Counted(index),
            Err(reason) => Ballot::Discarded(reason),
        }
    }

    pub fn invocation_failed(message: impl Into<String>) -> Self {
        Ballot::Discarded(DiscardReason::InvocationFailed {
            message: message.into(),
        })
    }

    pub fn timed_out() -> Self {
        Ballot::Discarded(DiscardReason::TimedOut)
    }

    pub fn is_counted(&self) -> bool {
        matches!(self, Ballot::Counted(_))
    }

    pub fn candidate(&self) -> Option<usize> {
        match self {
            Ballot::Counted(index) => Some(*index),
            Ballot::Discarded(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted_from_response() {
        let ballot = Ballot::from_response("I prefer the first.\nvote: 1", "vote:", 2);
        assert_eq!(ballot, Ballot::Counted(0));
        assert_eq!(ballot.candidate(), Some(0));
    }

    #[test]
    fn test_malformed_responses() {
        let ballot = Ballot::from_response("not a number", "vote:", 3);
        assert!(matches!(
            ballot,
            Ballot::Discarded(DiscardReason::Unparseable { .. })
        ));

        let ballot = Ballot::from_response("VOTE: 9", "vote:", 3);
        assert_eq!(
            ballot,
            Ballot::Discarded(DiscardReason::OutOfRange {
                index: 9,
                candidates: 3
            })
        );
    }

    #[test]
    fn test_is_malformed() {
        assert!(DiscardReason::Unparseable { text: "x".into() }.is_malformed());
        assert!(!DiscardReason::TimedOut.is_malformed());
        assert!(!Ballot::invocation_failed("boom").is_counted());
    }

    #[test]
    fn test_discard_reason_display() {
        assert_eq!(
            DiscardReason::OutOfRange {
                index: 0,
                candidates: 2
            }
            .to_string(),
            "vote 0 outside 1..=2"
        );
        assert_eq!(DiscardReason::TimedOut.to_string(), "invocation timed out");
    }
}
