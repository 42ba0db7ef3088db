//! In-process agent dispatch.
//!
//! [`LocalAgentInvoker`] calls agents that live in the same process as the
//! voter. Each agent implements [`LocalAgent`]; the invoker only resolves
//! the name and forwards the call.

use async_trait::async_trait;
use judge_application::ports::agent_invoker::{
    AgentArgs, AgentInvoker, InvocationError, SideChannel,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// An agent that answers in-process.
#[async_trait]
pub trait LocalAgent: Send + Sync {
    async fn respond(
        &self,
        args: &AgentArgs,
        side_channel: &SideChannel,
        cancellation: &CancellationToken,
    ) -> Result<String, InvocationError>;
}

/// Dispatches invocations to registered [`LocalAgent`]s by name.
#[derive(Default)]
pub struct LocalAgentInvoker {
    agents: HashMap<String, Arc<dyn LocalAgent>>,
}

impl LocalAgentInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, name: impl Into<String>, agent: Arc<dyn LocalAgent>) -> Self {
        self.register(name, agent);
        self
    }

    /// Register `agent` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, agent: Arc<dyn LocalAgent>) {
        self.agents.insert(name.into(), agent);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// Registered agent names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.agents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl AgentInvoker for LocalAgentInvoker {
    async fn invoke(
        &self,
        agent: &str,
        args: &AgentArgs,
        side_channel: &SideChannel,
        cancellation: &CancellationToken,
    ) -> Result<String, InvocationError> {
        let target = self
            .agents
            .get(agent)
            .ok_or_else(|| InvocationError::AgentNotFound(agent.to_string()))?;

        if cancellation.is_cancelled() {
            return Err(InvocationError::Cancelled);
        }

        debug!("Invoking local agent {}", agent);
        target.respond(args, side_channel, cancellation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoAgent;

    #[async_trait]
    impl LocalAgent for EchoAgent {
        async fn respond(
            &self,
            args: &AgentArgs,
            side_channel: &SideChannel,
            _cancellation: &CancellationToken,
        ) -> Result<String, InvocationError> {
            Ok(format!(
                "{} / {}",
                args["problem"].as_str().unwrap_or_default(),
                side_channel.get("trace").and_then(|v| v.as_str()).unwrap_or("-")
            ))
        }
    }

    fn args() -> AgentArgs {
        let mut args = AgentArgs::new();
        args.insert("problem".into(), json!("2 + 2"));
        args
    }

    #[tokio::test]
    async fn test_dispatches_by_name() {
        let invoker = LocalAgentInvoker::new().with_agent("echo", Arc::new(EchoAgent));
        let mut side_channel = SideChannel::new();
        side_channel.insert("trace".into(), json!("abc"));

        let text = invoker
            .invoke("echo", &args(), &side_channel, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, "2 + 2 / abc");
    }

    #[tokio::test]
    async fn test_unknown_agent() {
        let invoker = LocalAgentInvoker::new().with_agent("echo", Arc::new(EchoAgent));

        let err = invoker
            .invoke(
                "judge",
                &args(),
                &SideChannel::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, InvocationError::AgentNotFound("judge".into()));
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let invoker = LocalAgentInvoker::new().with_agent("echo", Arc::new(EchoAgent));
        let token = CancellationToken::new();
        token.cancel();

        let err = invoker
            .invoke("echo", &args(), &SideChannel::new(), &token)
            .await
            .unwrap_err();

        assert_eq!(err, InvocationError::Cancelled);
    }

    #[test]
    fn test_names_sorted() {
        let invoker = LocalAgentInvoker::new()
            .with_agent("zeta", Arc::new(EchoAgent))
            .with_agent("alpha", Arc::new(EchoAgent));

        assert_eq!(invoker.names(), vec!["alpha", "zeta"]);
        assert!(invoker.contains("zeta"));
        assert!(!invoker.contains("beta"));
    }
}
