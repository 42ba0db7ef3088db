//! Port for structured vote event logging.
//!
//! Defines the [`VoteEventLogger`] trait for recording voting rounds
//! (launch, each ballot, decision) to a machine-readable transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures what each judge
//! answered and how it was counted.

use serde_json::Value;

/// A structured vote event.
pub struct VoteEvent {
    /// Event type identifier (`round_started`, `ballot`, `decision`).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl VoteEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging vote events.
///
/// `log` is synchronous and infallible so a broken log never disturbs a
/// voting round; implementations swallow their own I/O errors.
pub trait VoteEventLogger: Send + Sync {
    fn log(&self, event: VoteEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoVoteEventLogger;

impl VoteEventLogger for NoVoteEventLogger {
    fn log(&self, _event: VoteEvent) {}
}
