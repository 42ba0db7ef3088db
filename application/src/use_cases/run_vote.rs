//! Run Vote use case
//!
//! Asks the same judge the same question several times in parallel and
//! resolves a winner as soon as one candidate reaches quorum.
//!
//! ```text
//! QuorumVoter::execute
//!   ├─ spawn N × AgentInvoker::invoke      (JoinSet, identical args)
//!   ├─ join_next() in completion order     (single owner of the tally)
//!   │    └─ response → Ballot → tally
//!   │         └─ quorum reached? cancel round, abort stragglers, return
//!   └─ all drained → plurality (lowest index wins ties)
//! ```

use crate::config::ExecutionParams;
use crate::ports::agent_invoker::{AgentArgs, AgentInvoker, InvocationError, SideChannel};
use crate::ports::progress::{NoProgress, VoteProgressNotifier};
use crate::ports::vote_logger::{NoVoteEventLogger, VoteEvent, VoteEventLogger};
use judge_domain::core::string::preview;
use judge_domain::{
    Ballot, CandidateSet, Decision, DomainError, ExtractionToken, JudgePayload, VoteTally,
    VotingConfig,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Maximum length of a judge response quoted in log messages
const RESPONSE_PREVIEW_LEN: usize = 160;

/// Errors that can occur during a voting round
///
/// Individual judge failures never surface here; they become discarded
/// ballots. `Cancelled` only occurs when a caller token was supplied via
/// [`QuorumVoter::with_cancellation`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunVoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Voting round cancelled")]
    Cancelled,
}

impl From<DomainError> for RunVoteError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidInput(message) => RunVoteError::InvalidInput(message),
        }
    }
}

/// Input for one voting round
#[derive(Debug, Clone)]
pub struct VoteRequest {
    /// Problem statement shown to the judge
    pub problem: String,
    /// Candidate answers, in display order
    pub candidates: Vec<String>,
    /// Metadata forwarded untouched to every invocation
    pub side_channel: SideChannel,
    /// Overrides the configured extraction token for this round
    pub extraction_token: Option<ExtractionToken>,
}

impl VoteRequest {
    pub fn new(problem: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            problem: problem.into(),
            candidates,
            side_channel: SideChannel::new(),
            extraction_token: None,
        }
    }

    pub fn with_side_channel(mut self, side_channel: SideChannel) -> Self {
        self.side_channel = side_channel;
        self
    }

    pub fn with_extraction_token(mut self, token: impl Into<ExtractionToken>) -> Self {
        self.extraction_token = Some(token.into());
        self
    }
}

/// Quorum voter over redundant judge invocations
///
/// Holds no state between rounds; each call to [`QuorumVoter::execute`]
/// builds its own tally and decision.
pub struct QuorumVoter {
    invoker: Arc<dyn AgentInvoker>,
    config: VotingConfig,
    params: ExecutionParams,
    logger: Arc<dyn VoteEventLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl QuorumVoter {
    pub fn new(invoker: Arc<dyn AgentInvoker>, config: VotingConfig) -> Self {
        Self {
            invoker,
            config,
            params: ExecutionParams::default(),
            logger: Arc::new(NoVoteEventLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn VoteEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Abort rounds when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn config(&self) -> &VotingConfig {
        &self.config
    }

    /// Decide between `candidates` for `problem`
    pub async fn vote(&self, problem: &str, candidates: &[String]) -> Result<Decision, RunVoteError> {
        self.execute(VoteRequest::new(problem, candidates.to_vec()))
            .await
    }

    /// Execute a voting round with default (no-op) progress
    pub async fn execute(&self, request: VoteRequest) -> Result<Decision, RunVoteError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute a voting round with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: VoteRequest,
        progress: &dyn VoteProgressNotifier,
    ) -> Result<Decision, RunVoteError> {
        self.config.validate()?;
        let candidates = CandidateSet::new(request.candidates)?;
        let candidate_count = candidates.len();
        let token = request
            .extraction_token
            .unwrap_or_else(|| self.params.extraction_token.clone());
        let payload = JudgePayload::new(request.problem, candidates, token);

        let judge = self.config.judge_name.as_str();
        let quorum = self.config.winning_vote_count;

        info!(
            "Starting vote: judge {} x{}, {} candidates, quorum {}",
            judge, self.config.number_of_votes, candidate_count, quorum
        );
        if !self.config.quorum_reachable() {
            warn!(
                "winning_vote_count {} exceeds number_of_votes {}; round will resolve by plurality",
                quorum, self.config.number_of_votes
            );
        }
        self.logger.log(VoteEvent::new(
            "round_started",
            json!({
                "judge": judge,
                "number_of_votes": self.config.number_of_votes,
                "winning_vote_count": quorum,
                "candidates": payload.candidates().as_slice(),
                "extraction_token": payload.token().as_str(),
            }),
        ));

        let round = match &self.cancellation_token {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let mut join_set = self.launch(
            Arc::new(payload.to_args()),
            Arc::new(request.side_channel),
            &round,
        );
        progress.on_round_start(judge, self.config.number_of_votes);

        let mut tally = VoteTally::new(candidate_count);
        let mut discarded = 0;

        loop {
            let joined = if let Some(ref token) = self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        round.cancel();
                        join_set.abort_all();
                        warn!("Vote with judge {} cancelled by caller", judge);
                        return Err(RunVoteError::Cancelled);
                    }
                    joined = join_set.join_next() => joined,
                }
            } else {
                join_set.join_next().await
            };

            let Some(joined) = joined else {
                break; // All invocations finished
            };

            let ballot = Self::to_ballot(joined, payload.token(), candidate_count);
            progress.on_ballot(&ballot);
            self.logger.log(VoteEvent::new(
                "ballot",
                json!({
                    "judge": judge,
                    "ballot": serde_json::to_value(&ballot).unwrap_or_default(),
                }),
            ));

            match ballot {
                Ballot::Counted(index) => {
                    let votes = tally.record(index) as usize;
                    debug!(
                        "Judge {} voted for candidate {} ({}/{})",
                        judge,
                        index + 1,
                        votes,
                        quorum
                    );
                    if votes >= quorum {
                        // Stragglers are abandoned; their results are never read.
                        round.cancel();
                        join_set.abort_all();
                        return Ok(self.finish(Decision::quorum(tally, index, discarded), progress));
                    }
                }
                Ballot::Discarded(reason) => {
                    discarded += 1;
                    warn!("Discarded vote from judge {}: {}", judge, reason);
                }
            }
        }

        Ok(self.finish(Decision::plurality(tally, discarded), progress))
    }

    /// Spawn `number_of_votes` identical invocations of the judge
    fn launch(
        &self,
        args: Arc<AgentArgs>,
        side_channel: Arc<SideChannel>,
        round: &CancellationToken,
    ) -> JoinSet<Result<String, InvocationError>> {
        let mut join_set = JoinSet::new();

        for _ in 0..self.config.number_of_votes {
            let invoker = Arc::clone(&self.invoker);
            let judge = self.config.judge_name.clone();
            let args = Arc::clone(&args);
            let side_channel = Arc::clone(&side_channel);
            let cancellation = round.child_token();
            let timeout = self.params.invocation_timeout;

            join_set.spawn(async move {
                invoke_judge(
                    invoker.as_ref(),
                    &judge,
                    &args,
                    &side_channel,
                    &cancellation,
                    timeout,
                )
                .await
            });
        }

        join_set
    }

    fn to_ballot(
        joined: Result<Result<String, InvocationError>, JoinError>,
        token: &ExtractionToken,
        candidate_count: usize,
    ) -> Ballot {
        match joined {
            Ok(Ok(response)) => {
                let ballot = Ballot::from_response(&response, token.as_str(), candidate_count);
                if !ballot.is_counted() {
                    debug!(
                        "Malformed judge response: {}",
                        preview(&response, RESPONSE_PREVIEW_LEN)
                    );
                }
                ballot
            }
            Ok(Err(InvocationError::Timeout)) => Ballot::timed_out(),
            Ok(Err(e)) => Ballot::invocation_failed(e.to_string()),
            Err(e) => Ballot::invocation_failed(format!("task join error: {}", e)),
        }
    }

    fn finish(&self, decision: Decision, progress: &dyn VoteProgressNotifier) -> Decision {
        info!(
            "Vote decided by {}: candidate {} with {} vote(s), tally {:?} ({} discarded)",
            decision.resolution,
            decision.winner_index + 1,
            decision.winner_votes(),
            decision.tally.counts(),
            decision.discarded
        );
        progress.on_decision(&decision);
        self.logger.log(VoteEvent::new(
            "decision",
            json!({
                "judge": self.config.judge_name,
                "decision": serde_json::to_value(&decision).unwrap_or_default(),
            }),
        ));
        decision
    }
}

/// Invoke the judge once, mapping an elapsed timeout to `InvocationError::Timeout`
async fn invoke_judge(
    invoker: &dyn AgentInvoker,
    judge: &str,
    args: &AgentArgs,
    side_channel: &SideChannel,
    cancellation: &CancellationToken,
    timeout: Option<Duration>,
) -> Result<String, InvocationError> {
    let call = invoker.invoke(judge, args, side_channel, cancellation);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(InvocationError::Timeout)),
        None => call.await,
    }
}
