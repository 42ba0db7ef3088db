//! Agent invoker adapters
//!
//! Concrete transports for the [`AgentInvoker`](judge_application::AgentInvoker)
//! port:
//!
//! - [`LocalAgentInvoker`]: in-process agents ([`LocalAgent`])
//! - [`CommandAgent`]: a `LocalAgent` that runs an external program
//! - `HttpAgentInvoker`: remote agents over HTTP (feature `http`)
//! - [`RoutingInvoker`]: picks a transport per agent name
//!
//! Transports that pool per-agent state share a [`SessionRegistry`].

mod command;
#[cfg(feature = "http")]
mod http;
mod local;
mod registry;
mod routing;

pub use command::{CommandAgent, SIDE_CHANNEL_ENV};
#[cfg(feature = "http")]
pub use http::HttpAgentInvoker;
pub use local::{LocalAgent, LocalAgentInvoker};
pub use registry::SessionRegistry;
pub use routing::RoutingInvoker;
