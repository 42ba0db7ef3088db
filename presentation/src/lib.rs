//! Presentation layer for judge-quorum
//!
//! This crate contains CLI definitions, output formatters and progress
//! reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::candidates::parse_candidates;
pub use cli::commands::{Cli, Command, ExtractArgs, OutputFormat, VoteArgs};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, VoteReport};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
