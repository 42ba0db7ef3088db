//! Prompt templates for judge invocations

use crate::extraction::ExtractionToken;
use crate::quorum::CandidateSet;
use serde_json::{Map, Value, json};

/// Templates for the text shown to judges
pub struct JudgePromptTemplate;

impl JudgePromptTemplate {
    /// System prompt for a discriminator judge
    pub fn judge_system() -> &'static str {
        r#"You are an impartial judge comparing candidate answers to the same problem.
Decide which candidate is correct. Reason step by step if it helps,
then finish with the marker line requested in the prompt."#
    }

    /// User prompt asking the judge to pick one candidate
    pub fn vote_prompt(problem: &str, candidates: &CandidateSet, token: &ExtractionToken) -> String {
        format!(
            r#"Problem:
{}

Candidate answers:
{}

Which candidate answer is correct? Explain your reasoning briefly, then end
your response with a final line of the form:

{} <number>

where <number> is between 1 and {}."#,
            problem,
            candidates.numbered(),
            Self::marker(token),
            candidates.len()
        )
    }

    /// Marker as judges should write it, e.g. `VOTE:`
    ///
    /// Characters whose uppercase form would not fold back to the token
    /// under case-insensitive extraction (`ß` → `SS`) are kept as configured.
    fn marker(token: &ExtractionToken) -> String {
        token
            .as_str()
            .trim()
            .chars()
            .map(|c| {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) if u.to_lowercase().eq(c.to_lowercase()) => u,
                    _ => c,
                }
            })
            .collect()
    }
}

/// Invocation payload shared by every judge call of one round
///
/// All invocations receive identical arguments; the redundancy is what
/// smooths out noisy individual judgments.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgePayload {
    problem: String,
    candidates: CandidateSet,
    token: ExtractionToken,
}

impl JudgePayload {
    pub fn new(problem: impl Into<String>, candidates: CandidateSet, token: ExtractionToken) -> Self {
        Self {
            problem: problem.into(),
            candidates,
            token,
        }
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn token(&self) -> &ExtractionToken {
        &self.token
    }

    pub fn prompt(&self) -> String {
        JudgePromptTemplate::vote_prompt(&self.problem, &self.candidates, &self.token)
    }

    /// Arguments map handed to the agent invoker
    ///
    /// Keys: `problem`, `candidates` (numbered text), `candidate_count`,
    /// `system_prompt`, `prompt`, `extraction_token`.
    pub fn to_args(&self) -> Map<String, Value> {
        let value = json!({
            "problem": self.problem,
            "candidates": self.candidates.numbered(),
            "candidate_count": self.candidates.len(),
            "system_prompt": JudgePromptTemplate::judge_system(),
            "prompt": self.prompt(),
            "extraction_token": self.token.as_str(),
        });
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
