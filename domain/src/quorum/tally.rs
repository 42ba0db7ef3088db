//! Vote tally

use serde::{Deserialize, Serialize};

/// Vote counts aligned to candidate indices
///
/// Every candidate starts at zero. The tally is owned by a single
/// coordinating task; it is never shared across concurrent writers.
///
/// # Example
///
/// ```
/// use judge_domain::quorum::VoteTally;
///
/// let mut tally = VoteTally::new(3);
/// assert_eq!(tally.record(0), 1);
/// assert_eq!(tally.record(2), 1);
/// assert_eq!(tally.record(0), 2);
/// assert_eq!(tally.counts(), &[2, 0, 1]);
/// assert_eq!(tally.leader(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally {
    counts: Vec<u32>,
}

impl VoteTally {
    pub fn new(candidates: usize) -> Self {
        Self {
            counts: vec![0; candidates],
        }
    }

    /// Add one vote and return the candidate's new count
    ///
    /// # Panics
    /// Panics if `index` is outside the candidate range; ballots are
    /// range-checked before they reach the tally.
    pub fn record(&mut self, index: usize) -> u32 {
        let count = &mut self.counts[index];
        *count += 1;
        *count
    }

    pub fn count(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Candidate with the most votes
    ///
    /// Ties go to the lowest index. An all-zero tally therefore selects
    /// index 0. This is a stable contract, not an iteration artifact.
    pub fn leader(&self) -> usize {
        let mut best = 0;
        for (index, &count) in self.counts.iter().enumerate() {
            if count > self.counts[best] {
                best = index;
            }
        }
        best
    }

    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }
}
