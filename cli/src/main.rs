//! CLI entrypoint for judge-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use judge_application::{AgentInvoker, QuorumVoter, VoteRequest};
use judge_domain::{extract_decomposition, extract_final};
use judge_infrastructure::{
    AgentTransport, CommandAgent, ConfigLoader, ConfigValidationError, FileConfig,
    JsonlVoteEventLogger, LocalAgentInvoker, RoutingInvoker,
};
use judge_presentation::{
    Cli, Command, ConsoleFormatter, ExtractArgs, OutputFormat, ProgressReporter, SimpleProgress,
    VoteArgs, VoteReport, parse_candidates,
};
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    config.validate()?;

    match cli.command {
        Some(Command::Vote(args)) => run_vote(args, config, cli.quiet).await,
        Some(Command::Extract(args)) => run_extract(args, &config),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_vote(args: VoteArgs, config: FileConfig, quiet: bool) -> Result<()> {
    let mut candidates = args.candidates;
    if let Some(path) = &args.candidates_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read candidates from {}", path.display()))?;
        candidates.extend(parse_candidates(&text));
    }

    // CLI flags override the loaded configuration
    let mut voting = config.voting.clone();
    if let Some(judge) = args.judge {
        voting.judge = judge;
    }
    if let Some(votes) = args.votes {
        voting.number_of_votes = votes;
    }
    if let Some(quorum) = args.quorum {
        voting.winning_vote_count = quorum;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            bail!(ConfigValidationError::InvalidTimeout);
        }
        voting.timeout_seconds = Some(timeout);
    }
    if let Some(token) = args.token {
        if token.trim().is_empty() {
            bail!(ConfigValidationError::EmptyExtractionToken);
        }
        voting.extraction_token = token;
    }

    let voting_config = voting.to_voting_config();
    let invoker = build_invoker(&config, voting.invocation_timeout())?;
    if !invoker.has_route(&voting_config.judge_name) {
        bail!(
            "No transport configured for judge '{0}'. Add an [agents.{0}] section with `endpoint` or `command`.",
            voting_config.judge_name
        );
    }

    // Ctrl-C aborts the round
    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut voter = QuorumVoter::new(Arc::new(invoker), voting_config.clone())
        .with_params(voting.to_execution_params())
        .with_cancellation(cancellation);

    if let Some(path) = args.vote_log.or_else(|| config.logging.vote_log.clone()) {
        match JsonlVoteEventLogger::new(&path) {
            Some(logger) => {
                info!("Logging vote events to {}", logger.path().display());
                voter = voter.with_logger(Arc::new(logger));
            }
            None => warn!("Vote log disabled: could not open {}", path.display()),
        }
    }

    let request = VoteRequest::new(args.problem.clone(), candidates.clone());
    let decision = if quiet || args.output == OutputFormat::Json {
        voter.execute(request).await?
    } else if std::io::stderr().is_terminal() {
        voter.execute_with_progress(request, &ProgressReporter::new()).await?
    } else {
        voter.execute_with_progress(request, &SimpleProgress).await?
    };

    let report = VoteReport {
        problem: &args.problem,
        judge: &voting_config.judge_name,
        candidates: &candidates,
        decision: &decision,
    };
    let output = match args.output {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Winner => ConsoleFormatter::format_winner(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };

    println!("{}", output);

    Ok(())
}

fn run_extract(args: ExtractArgs, config: &FileConfig) -> Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let token = args
        .token
        .unwrap_or_else(|| config.voting.extraction_token.clone());

    let final_answer = extract_final(&text, &token);
    let decomposition = extract_decomposition(&text, &token);

    print!(
        "{}",
        ConsoleFormatter::format_extraction(&final_answer, decomposition.as_deref())
    );

    Ok(())
}

/// Build the invoker for every agent in `[agents]`
fn build_invoker(config: &FileConfig, request_timeout: Option<Duration>) -> Result<RoutingInvoker> {
    let mut local = LocalAgentInvoker::new();
    let mut http_agents: Vec<(&str, &str)> = Vec::new();

    for (name, agent) in &config.agents {
        match agent.transport() {
            Some(AgentTransport::Command(argv)) => {
                let command = CommandAgent::from_argv(argv)
                    .ok_or_else(|| ConfigValidationError::EmptyCommand(name.clone()))?;
                local.register(name.as_str(), Arc::new(command));
            }
            Some(AgentTransport::Http(endpoint)) => http_agents.push((name.as_str(), endpoint)),
            None => return Err(ConfigValidationError::AmbiguousTransport(name.clone()).into()),
        }
    }

    let mut router = RoutingInvoker::new();

    let local_names: Vec<String> = local.names().into_iter().map(String::from).collect();
    let local: Arc<dyn AgentInvoker> = Arc::new(local);
    for name in local_names {
        router = router.with_route(name, Arc::clone(&local));
    }

    if !http_agents.is_empty() {
        router = add_http_routes(router, &http_agents, request_timeout)?;
    }

    Ok(router)
}

#[cfg(feature = "http")]
fn add_http_routes(
    mut router: RoutingInvoker,
    agents: &[(&str, &str)],
    request_timeout: Option<Duration>,
) -> Result<RoutingInvoker> {
    use judge_infrastructure::{HttpAgentInvoker, SessionRegistry};

    let mut http =
        HttpAgentInvoker::new(Arc::new(SessionRegistry::new())).with_request_timeout(request_timeout);
    for (name, endpoint) in agents {
        http = http.with_endpoint(*name, *endpoint);
    }

    let http: Arc<dyn AgentInvoker> = Arc::new(http);
    for (name, _) in agents {
        router = router.with_route(*name, Arc::clone(&http));
    }
    Ok(router)
}

#[cfg(not(feature = "http"))]
fn add_http_routes(
    _router: RoutingInvoker,
    agents: &[(&str, &str)],
    _request_timeout: Option<Duration>,
) -> Result<RoutingInvoker> {
    let name = agents.first().map(|(name, _)| *name).unwrap_or_default();
    bail!(
        "Agent '{}' uses an HTTP endpoint, but judge-quorum was built without the `http` feature",
        name
    )
}
