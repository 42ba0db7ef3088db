//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly and are converted into
//! domain/application types (`VotingConfig`, `ExecutionParams`) at the edge.

use judge_application::ExecutionParams;
use judge_domain::{ExtractionToken, VotingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("extraction_token cannot be empty")]
    EmptyExtractionToken,

    #[error("invalid voting settings: {0}")]
    InvalidVoting(String),

    #[error("agent '{0}' must set exactly one of `endpoint` or `command`")]
    AmbiguousTransport(String),

    #[error("agent '{0}' has an empty command")]
    EmptyCommand(String),
}

/// Raw voting configuration (`[voting]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Name of the judge agent
    pub judge: String,
    /// Number of parallel judge invocations
    pub number_of_votes: usize,
    /// Votes one candidate needs to win early
    pub winning_vote_count: usize,
    /// Timeout in seconds for each invocation
    pub timeout_seconds: Option<u64>,
    /// Marker preceding the vote in judge responses
    pub extraction_token: String,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            judge: VotingConfig::DEFAULT_JUDGE.to_string(),
            number_of_votes: VotingConfig::DEFAULT_NUMBER_OF_VOTES,
            winning_vote_count: VotingConfig::DEFAULT_WINNING_VOTE_COUNT,
            timeout_seconds: Some(120),
            extraction_token: ExtractionToken::DEFAULT.to_string(),
        }
    }
}

impl FileVotingConfig {
    pub fn to_voting_config(&self) -> VotingConfig {
        VotingConfig::new(&self.judge, self.number_of_votes, self.winning_vote_count)
    }

    pub fn invocation_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_invocation_timeout(self.invocation_timeout())
            .with_extraction_token(self.extraction_token.as_str())
    }
}

/// How an agent is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTransport<'a> {
    /// POST to this URL
    Http(&'a str),
    /// Run this argv
    Command(&'a [String]),
}

/// Raw agent configuration (`[agents.<name>]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// HTTP endpoint accepting invocation requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Program and arguments to run per invocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

impl FileAgentConfig {
    /// Transport for this agent, `None` unless exactly one is configured
    pub fn transport(&self) -> Option<AgentTransport<'_>> {
        match (&self.endpoint, &self.command) {
            (Some(endpoint), None) => Some(AgentTransport::Http(endpoint)),
            (None, Some(command)) => Some(AgentTransport::Command(command)),
            _ => None,
        }
    }
}

/// Raw logging configuration (`[logging]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL vote transcript path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Voting settings
    pub voting: FileVotingConfig,
    /// Agent transports by name
    pub agents: BTreeMap<String, FileAgentConfig>,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.voting.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.voting.extraction_token.trim().is_empty() {
            return Err(ConfigValidationError::EmptyExtractionToken);
        }

        self.voting
            .to_voting_config()
            .validate()
            .map_err(|e| ConfigValidationError::InvalidVoting(e.to_string()))?;

        for (name, agent) in &self.agents {
            match agent.transport() {
                None => return Err(ConfigValidationError::AmbiguousTransport(name.clone())),
                Some(AgentTransport::Command(argv))
                    if argv.first().is_none_or(|p| p.trim().is_empty()) =>
                {
                    return Err(ConfigValidationError::EmptyCommand(name.clone()));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Render as TOML (for `--show-config`)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
