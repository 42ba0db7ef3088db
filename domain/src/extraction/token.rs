//! Extraction token value object

use serde::{Deserialize, Serialize};

/// Case-insensitive marker separating a judge's reasoning from its answer.
///
/// Judges are asked to end their response with a line such as `VOTE: 2`.
/// The token is matched ignoring case; the text after it keeps its casing.
///
/// # Example
///
/// ```
/// use judge_domain::extraction::ExtractionToken;
///
/// assert_eq!(ExtractionToken::default().as_str(), "vote:");
/// assert!(ExtractionToken::new("   ").is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionToken(String);

impl ExtractionToken {
    /// Token used when neither configuration nor the caller supplies one
    pub const DEFAULT: &'static str = "vote:";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank token never matches; extraction falls back to the last line.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for ExtractionToken {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl std::fmt::Display for ExtractionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExtractionToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExtractionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ExtractionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
