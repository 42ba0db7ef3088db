//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for voting results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tally, resolution and winner
    Full,
    /// Only the winning candidate's text
    Winner,
    /// JSON output
    Json,
}

/// CLI arguments for judge-quorum
#[derive(Parser, Debug)]
#[command(name = "judge-quorum")]
#[command(author, version, about = "Quorum voting over redundant judge agents")]
#[command(long_about = r#"
judge-quorum asks one judge agent the same question several times in parallel
and picks a candidate answer by vote.

The round ends as soon as one candidate collects the winning vote count.
Otherwise the candidate with the most votes wins (lowest index on ties).

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. ./judge-quorum.toml                      Project-level config
3. ~/.config/judge-quorum/config.toml       Global config

Example:
  judge-quorum vote -p "What is 6 * 7?" -c 42 -c 36 -c 48
  judge-quorum vote -p "Pick the fix" --candidates-file fixes.json -o json
  echo "reasoning... VOTE: 2" | judge-quorum extract
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a voting round over candidate answers
    Vote(VoteArgs),
    /// Extract the final answer (and decomposition) from a judge response
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
pub struct VoteArgs {
    /// Problem statement shown to the judge
    #[arg(short, long)]
    pub problem: String,

    /// Candidate answer (can be specified multiple times)
    #[arg(short = 'c', long = "candidate", value_name = "TEXT")]
    pub candidates: Vec<String>,

    /// File with candidates: a JSON array of strings, or one per line
    #[arg(long, value_name = "PATH")]
    pub candidates_file: Option<PathBuf>,

    /// Judge agent name
    #[arg(short, long, value_name = "NAME")]
    pub judge: Option<String>,

    /// Number of parallel judge invocations
    #[arg(short = 'n', long, value_name = "N")]
    pub votes: Option<usize>,

    /// Votes a candidate needs to win early
    #[arg(long, value_name = "N")]
    pub quorum: Option<usize>,

    /// Timeout per invocation in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Marker preceding the vote in judge responses
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Append vote events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub vote_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Marker preceding the final answer
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// File to read (stdin if omitted)
    pub file: Option<PathBuf>,
}
