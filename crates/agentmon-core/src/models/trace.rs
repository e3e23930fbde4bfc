//! Trace data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker appended to a response excerpt when the response was truncated
pub const TRUNCATION_MARKER: &str = "...";

/// Status of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
    /// Call issued, terminal state not yet reached
    #[default]
    Started,
    /// Call returned a generation
    Completed,
    /// Call failed at the service
    Failed,
}

impl TraceStatus {
    /// Stable lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceStatus::Started => "started",
            TraceStatus::Completed => "completed",
            TraceStatus::Failed => "failed",
        }
    }
}

/// One record per attempted generation call
///
/// A trace is created in the `Started` state, finalized exactly once to
/// `Completed` or `Failed`, and never mutated after it is appended to the
/// monitor's log. Exactly one of the completion fields
/// (`input_tokens`/`output_tokens`/`response_excerpt`) or `error_message`
/// is populated on a terminal trace; `latency_ms` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Unique within a process: `{agent_name}_{started_at_millis}`.
    /// Two calls from the same agent within the same millisecond collide;
    /// accepted limitation.
    pub trace_id: String,

    /// Caller-supplied label, not validated
    pub agent_name: String,

    /// When the call started
    pub started_at: DateTime<Utc>,

    /// Lifecycle status
    pub status: TraceStatus,

    /// The input prompt, stored verbatim
    pub task: String,

    /// Elapsed wall time from call start to completion or failure
    pub latency_ms: f64,

    /// Input tokens (completed calls only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,

    /// Output tokens (completed calls only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,

    /// Response text truncated for storage (completed calls only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_excerpt: Option<String>,

    /// What the service reported (failed calls only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Trace {
    /// Start a new trace for a call issued at `started_at`
    pub(crate) fn begin(agent_name: &str, task: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            trace_id: format!("{}_{}", agent_name, started_at.timestamp_millis()),
            agent_name: agent_name.to_string(),
            started_at,
            status: TraceStatus::Started,
            task: task.to_string(),
            latency_ms: 0.0,
            input_tokens: None,
            output_tokens: None,
            response_excerpt: None,
            error_message: None,
        }
    }

    /// Finalize as completed
    pub(crate) fn complete(
        &mut self,
        latency_ms: f64,
        input_tokens: u64,
        output_tokens: u64,
        response_excerpt: String,
    ) {
        self.status = TraceStatus::Completed;
        self.latency_ms = latency_ms;
        self.input_tokens = Some(input_tokens);
        self.output_tokens = Some(output_tokens);
        self.response_excerpt = Some(response_excerpt);
    }

    /// Finalize as failed
    pub(crate) fn fail(&mut self, latency_ms: f64, error_message: String) {
        self.status = TraceStatus::Failed;
        self.latency_ms = latency_ms;
        self.error_message = Some(error_message);
    }

    /// Check if the trace has reached a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status != TraceStatus::Started
    }

    /// Get total tokens for a completed trace
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0)
    }
}

/// Truncate response text to `max_chars` characters, appending the
/// truncation marker when anything was cut. Counts characters, not bytes,
/// so multi-byte responses never split mid-codepoint.
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = text[..byte_idx].to_string();
            out.push_str(TRUNCATION_MARKER);
            out
        }
        None => text.to_string(),
    }
}
