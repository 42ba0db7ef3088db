//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Prefix for environment overrides (`JUDGE_QUORUM_VOTING__NUMBER_OF_VOTES=5`)
pub const ENV_PREFIX: &str = "JUDGE_QUORUM_";

/// Environment variable overriding the extraction token
pub const EXTRACTION_TOKEN_ENV: &str = "VOTE_EXTRACTION_TOKEN";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["judge-quorum.toml", ".judge-quorum.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `VOTE_EXTRACTION_TOKEN`, then `JUDGE_QUORUM_*`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./judge-quorum.toml` or `./.judge-quorum.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/judge-quorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Build the merged provider chain without extracting it
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[EXTRACTION_TOKEN_ENV])
                    .map(|_| "voting.extraction_token".into()),
            )
    }

    /// Load only default configuration (for --no-config)
    ///
    /// `VOTE_EXTRACTION_TOKEN` still applies; it is read by every run.
    pub fn load_defaults() -> FileConfig {
        let mut config = FileConfig::default();
        if let Ok(token) = std::env::var(EXTRACTION_TOKEN_ENV)
            && !token.trim().is_empty()
        {
            config.voting.extraction_token = token;
        }
        config
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("judge-quorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if std::env::var_os(EXTRACTION_TOKEN_ENV).is_some() {
            println!("  [FOUND] Env:     {}", EXTRACTION_TOKEN_ENV);
        }
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}
