//! HTTP agent transport.
//!
//! Each invocation POSTs `{"agent", "args", "side_channel"}` to the agent's
//! endpoint. The response body may be a JSON object with a `text` (or
//! `response`) string, a bare JSON string, or plain text.

use super::registry::SessionRegistry;
use async_trait::async_trait;
use judge_application::ports::agent_invoker::{
    AgentArgs, AgentInvoker, InvocationError, SideChannel,
};
use judge_domain::core::string::preview;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Maximum error body length quoted in errors
const ERROR_BODY_PREVIEW_LEN: usize = 300;

/// Invokes remote agents over HTTP.
///
/// One `reqwest::Client` (and therefore one connection pool) is kept per
/// agent name in the shared [`SessionRegistry`].
pub struct HttpAgentInvoker {
    endpoints: HashMap<String, String>,
    clients: Arc<SessionRegistry<reqwest::Client>>,
    request_timeout: Option<Duration>,
}

impl HttpAgentInvoker {
    pub fn new(clients: Arc<SessionRegistry<reqwest::Client>>) -> Self {
        Self {
            endpoints: HashMap::new(),
            clients,
            request_timeout: None,
        }
    }

    pub fn with_endpoint(mut self, agent: impl Into<String>, url: impl Into<String>) -> Self {
        self.endpoints.insert(agent.into(), url.into());
        self
    }

    /// Client-level timeout, on top of the voter's invocation timeout.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self, agent: &str) -> Option<&str> {
        self.endpoints.get(agent).map(String::as_str)
    }

    fn client(&self, agent: &str) -> Result<Arc<reqwest::Client>, InvocationError> {
        self.clients.get_or_try_create(agent, || {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = self.request_timeout {
                builder = builder.timeout(timeout);
            }
            builder
                .build()
                .map_err(|e| InvocationError::Other(format!("HTTP client: {}", e)))
        })
    }

    async fn post(
        &self,
        agent: &str,
        endpoint: &str,
        body: &Value,
    ) -> Result<String, InvocationError> {
        let client = self.client(agent)?;
        let response = client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(InvocationError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                preview(&text, ERROR_BODY_PREVIEW_LEN)
            )));
        }

        Ok(response_text(&text))
    }
}

#[async_trait]
impl AgentInvoker for HttpAgentInvoker {
    async fn invoke(
        &self,
        agent: &str,
        args: &AgentArgs,
        side_channel: &SideChannel,
        cancellation: &CancellationToken,
    ) -> Result<String, InvocationError> {
        let endpoint = self
            .endpoint(agent)
            .ok_or_else(|| InvocationError::AgentNotFound(agent.to_string()))?;

        let body = json!({
            "agent": agent,
            "args": args,
            "side_channel": side_channel,
        });

        debug!("POST {} for agent {}", endpoint, agent);

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(InvocationError::Cancelled),
            result = self.post(agent, endpoint, &body) => result,
        }
    }
}

fn map_reqwest_error(error: reqwest::Error) -> InvocationError {
    if error.is_timeout() {
        InvocationError::Timeout
    } else if error.is_connect() {
        InvocationError::Connection(error.to_string())
    } else if error.is_decode() {
        InvocationError::InvalidResponse(error.to_string())
    } else {
        InvocationError::RequestFailed(error.to_string())
    }
}

/// Pull the judge's text out of a response body.
fn response_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["text", "response"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Ok(Value::String(text)) => text,
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let length = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}/invoke", addr), handle)
    }

    fn invoker(url: &str) -> HttpAgentInvoker {
        // Pre-seed a client that ignores any proxy set in the environment.
        let registry = Arc::new(SessionRegistry::new());
        registry.get_or_create("discriminator", || {
            reqwest::Client::builder().no_proxy().build().unwrap()
        });
        HttpAgentInvoker::new(registry).with_endpoint("discriminator", url)
    }

    #[test]
    fn test_response_text() {
        assert_eq!(response_text(r#"{"text": "VOTE: 2"}"#), "VOTE: 2");
        assert_eq!(response_text(r#"{"response": "VOTE: 1"}"#), "VOTE: 1");
        assert_eq!(response_text(r#""VOTE: 3""#), "VOTE: 3");
        assert_eq!(response_text("plain\nVOTE: 1"), "plain\nVOTE: 1");
        assert_eq!(response_text(r#"{"other": 1}"#), r#"{"other": 1}"#);
    }

    #[tokio::test]
    async fn test_posts_args_and_side_channel() {
        let (url, server) = serve_once("200 OK", r#"{"text": "Because.\nVOTE: 2"}"#).await;
        let mut args = AgentArgs::new();
        args.insert("problem".into(), json!("2 + 2"));
        let mut side_channel = SideChannel::new();
        side_channel.insert("request_id".into(), json!("r-9"));

        let text = invoker(&url)
            .invoke("discriminator", &args, &side_channel, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(text, "Because.\nVOTE: 2");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /invoke"));
        assert!(request.contains(r#""agent":"discriminator""#));
        assert!(request.contains(r#""problem":"2 + 2""#));
        assert!(request.contains(r#""request_id":"r-9""#));
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let (url, server) = serve_once("503 Service Unavailable", r#"{"error": "busy"}"#).await;

        let err = invoker(&url)
            .invoke(
                "discriminator",
                &AgentArgs::new(),
                &SideChannel::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            InvocationError::RequestFailed(message) => assert!(message.contains("503")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_agent() {
        let err = invoker("http://127.0.0.1:9/invoke")
            .invoke(
                "critic",
                &AgentArgs::new(),
                &SideChannel::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, InvocationError::AgentNotFound("critic".into()));
    }

    #[tokio::test]
    async fn test_client_reused_per_agent() {
        let registry = Arc::new(SessionRegistry::new());
        let invoker = HttpAgentInvoker::new(Arc::clone(&registry))
            .with_endpoint("a", "http://127.0.0.1:9/a")
            .with_endpoint("b", "http://127.0.0.1:9/b");

        let first = invoker.client("a").unwrap();
        let again = invoker.client("a").unwrap();
        invoker.client("b").unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(registry.len(), 2);
    }
}
