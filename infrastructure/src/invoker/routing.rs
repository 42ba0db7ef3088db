use async_trait::async_trait;
use judge_application::ports::agent_invoker::{
    AgentArgs, AgentInvoker, InvocationError, SideChannel,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Routes each invocation to the transport registered for the agent name.
///
/// Resolution order:
///  1. the invoker registered for the exact agent name
///  2. the default invoker, if any
///  3. otherwise `InvocationError::AgentNotFound`
#[derive(Default)]
pub struct RoutingInvoker {
    routes: HashMap<String, Arc<dyn AgentInvoker>>,
    default: Option<Arc<dyn AgentInvoker>>,
}

impl RoutingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, agent: impl Into<String>, invoker: Arc<dyn AgentInvoker>) -> Self {
        self.routes.insert(agent.into(), invoker);
        self
    }

    pub fn with_default(mut self, invoker: Arc<dyn AgentInvoker>) -> Self {
        self.default = Some(invoker);
        self
    }

    pub fn has_route(&self, agent: &str) -> bool {
        self.routes.contains_key(agent) || self.default.is_some()
    }

    fn resolve(&self, agent: &str) -> Result<&dyn AgentInvoker, InvocationError> {
        self.routes
            .get(agent)
            .or(self.default.as_ref())
            .map(|invoker| invoker.as_ref())
            .ok_or_else(|| InvocationError::AgentNotFound(agent.to_string()))
    }
}

#[async_trait]
impl AgentInvoker for RoutingInvoker {
    async fn invoke(
        &self,
        agent: &str,
        args: &AgentArgs,
        side_channel: &SideChannel,
        cancellation: &CancellationToken,
    ) -> Result<String, InvocationError> {
        self.resolve(agent)?
            .invoke(agent, args, side_channel, cancellation)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Mock invoker ----------------------------------------------------------

    struct Fixed(&'static str);

    #[async_trait]
    impl AgentInvoker for Fixed {
        async fn invoke(
            &self,
            agent: &str,
            _args: &AgentArgs,
            _side_channel: &SideChannel,
            _cancellation: &CancellationToken,
        ) -> Result<String, InvocationError> {
            Ok(format!("{}:{}", self.0, agent))
        }
    }

    async fn call(router: &RoutingInvoker, agent: &str) -> Result<String, InvocationError> {
        router
            .invoke(
                agent,
                &AgentArgs::new(),
                &SideChannel::new(),
                &CancellationToken::new(),
            )
            .await
    }

    // -- Tests -----------------------------------------------------------------

    #[tokio::test]
    async fn test_explicit_route_wins() {
        let router = RoutingInvoker::new()
            .with_route("judge", Arc::new(Fixed("http")))
            .with_default(Arc::new(Fixed("local")));

        assert_eq!(call(&router, "judge").await.unwrap(), "http:judge");
    }

    #[tokio::test]
    async fn test_falls_back_to_default() {
        let router = RoutingInvoker::new()
            .with_route("judge", Arc::new(Fixed("http")))
            .with_default(Arc::new(Fixed("local")));

        assert_eq!(call(&router, "critic").await.unwrap(), "local:critic");
        assert!(router.has_route("critic"));
    }

    #[tokio::test]
    async fn test_no_route_is_agent_not_found() {
        let router = RoutingInvoker::new().with_route("judge", Arc::new(Fixed("http")));

        assert_eq!(
            call(&router, "critic").await.unwrap_err(),
            InvocationError::AgentNotFound("critic".into())
        );
        assert!(!router.has_route("critic"));
    }
}
