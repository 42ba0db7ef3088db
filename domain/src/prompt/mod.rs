//! Prompt domain
//!
//! Templates and the shared invocation payload for judge agents.

mod template;

pub use template::{JudgePayload, JudgePromptTemplate};
