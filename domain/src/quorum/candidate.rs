//! Candidate set value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of candidate answers (Value Object)
///
/// Order is meaningful: it is the numbering shown to judges (1-based) and
/// the index space of the tally (0-based). Immutable once built.
///
/// # Example
///
/// ```
/// use judge_domain::quorum::CandidateSet;
///
/// let candidates = CandidateSet::new(vec!["42".into(), "41".into()]).unwrap();
/// assert_eq!(candidates.len(), 2);
/// assert_eq!(candidates.get(1), Some("41"));
/// assert!(CandidateSet::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    candidates: Vec<String>,
}

impl CandidateSet {
    /// Build a candidate set, failing with `InvalidInput` when empty
    pub fn new(candidates: Vec<String>) -> Result<Self, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::invalid_input("candidate set is empty"));
        }
        Ok(Self { candidates })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Never true for a constructed set
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate at a 0-based index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.candidates
    }

    /// Render the list the way judges see it: `1. first\n2. second`
    pub fn numbered(&self) -> String {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TryFrom<Vec<String>> for CandidateSet {
    type Error = DomainError;

    fn try_from(candidates: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_invalid_input() {
        let err = CandidateSet::new(Vec::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_numbered_is_one_based() {
        let set = CandidateSet::new(vec!["red".into(), "green".into(), "blue".into()]).unwrap();
        assert_eq!(set.numbered(), "1. red\n2. green\n3. blue");
    }

    #[test]
    fn test_get_is_zero_based() {
        let set = CandidateSet::new(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(set.get(0), Some("a"));
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn test_constructed_set_is_never_empty() {
        let set = CandidateSet::new(vec!["only".into()]).unwrap();
        assert!(!set.is_empty());
        assert_eq!(set.len(), 1);
    }
}
