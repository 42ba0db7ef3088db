//! Subprocess agent: run a configured program per invocation.
//!
//! The `prompt` argument (or, if absent, the full argument map as JSON) is
//! written to the child's stdin; stdout is the response. The side channel
//! is exposed to the child as JSON in `JUDGE_QUORUM_SIDE_CHANNEL`.

use super::local::LocalAgent;
use async_trait::async_trait;
use judge_application::ports::agent_invoker::{AgentArgs, InvocationError, SideChannel};
use judge_domain::core::string::preview;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Environment variable carrying the side channel.
pub const SIDE_CHANNEL_ENV: &str = "JUDGE_QUORUM_SIDE_CHANNEL";

/// Maximum stderr length quoted in errors
const STDERR_PREVIEW_LEN: usize = 500;

/// A [`LocalAgent`] backed by an external program.
#[derive(Debug, Clone)]
pub struct CommandAgent {
    program: String,
    args: Vec<String>,
}

impl CommandAgent {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv list (`["python3", "judge.py"]`).
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn stdin_payload(args: &AgentArgs) -> String {
        match args.get("prompt").and_then(|v| v.as_str()) {
            Some(prompt) => prompt.to_string(),
            None => serde_json::to_string(args).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl LocalAgent for CommandAgent {
    async fn respond(
        &self,
        args: &AgentArgs,
        side_channel: &SideChannel,
        cancellation: &CancellationToken,
    ) -> Result<String, InvocationError> {
        let side_channel_json = serde_json::to_string(side_channel)
            .map_err(|e| InvocationError::Other(format!("side channel: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(SIDE_CHANNEL_ENV, side_channel_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                InvocationError::Connection(format!("failed to spawn {}: {}", self.program, e))
            })?;

        debug!("Spawned judge command {}", self.program);

        let input = Self::stdin_payload(args);
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // The child may exit without reading its input.
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    debug!("Could not write judge stdin: {}", e);
                }
            }
        };

        // Dropping the child on cancellation kills it (kill_on_drop).
        let output = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Err(InvocationError::Cancelled),
            (_, output) = async move { tokio::join!(feed, child.wait_with_output()) } => output,
        }
        .map_err(|e| InvocationError::RequestFailed(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InvocationError::RequestFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                preview(&stderr, STDERR_PREVIEW_LEN)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> CommandAgent {
        CommandAgent::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    fn prompt_args(prompt: &str) -> AgentArgs {
        let mut args = AgentArgs::new();
        args.insert("prompt".into(), json!(prompt));
        args
    }

    #[tokio::test]
    async fn test_prompt_on_stdin_response_on_stdout() {
        let text = sh("cat")
            .respond(
                &prompt_args("Pick one.\nVOTE: 2"),
                &SideChannel::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(text, "Pick one.\nVOTE: 2");
    }

    #[tokio::test]
    async fn test_args_as_json_without_prompt() {
        let mut args = AgentArgs::new();
        args.insert("problem".into(), json!("x"));

        let text = sh("cat")
            .respond(&args, &SideChannel::new(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, r#"{"problem":"x"}"#);
    }

    #[tokio::test]
    async fn test_side_channel_in_env() {
        let mut side_channel = SideChannel::new();
        side_channel.insert("request_id".into(), json!("r-1"));

        let text = sh("printf '%s' \"$JUDGE_QUORUM_SIDE_CHANNEL\"")
            .respond(&prompt_args(""), &side_channel, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, r#"{"request_id":"r-1"}"#);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_request_failed() {
        let err = sh("echo 'model overloaded' >&2; exit 3")
            .respond(&prompt_args("q"), &SideChannel::new(), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            InvocationError::RequestFailed(message) => {
                assert!(message.contains("model overloaded"), "{}", message)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_connection_error() {
        let agent = CommandAgent::new("definitely-not-a-real-judge-binary", vec![]);
        let err = agent
            .respond(&prompt_args("q"), &SideChannel::new(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, InvocationError::Connection(_)));
    }

    #[tokio::test]
    async fn test_cancellation_stops_child() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let err = sh("sleep 10")
            .respond(&prompt_args("q"), &SideChannel::new(), &token)
            .await
            .unwrap_err();

        assert_eq!(err, InvocationError::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_from_argv() {
        let agent = CommandAgent::from_argv(&["python3".into(), "judge.py".into()]).unwrap();
        assert_eq!(agent.program(), "python3");
        assert!(CommandAgent::from_argv(&[]).is_none());
        assert!(CommandAgent::from_argv(&[" ".into()]).is_none());
    }
}
