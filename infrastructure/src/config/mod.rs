//! Configuration file loading for judge-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment (`VOTE_EXTRACTION_TOKEN`, `JUDGE_QUORUM_*`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./judge-quorum.toml` or `./.judge-quorum.toml`
//! 4. Global: `$XDG_CONFIG_HOME/judge-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    AgentTransport, ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig,
    FileVotingConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, EXTRACTION_TOKEN_ENV};
