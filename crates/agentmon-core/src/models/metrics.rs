//! Metrics data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Trace;

/// Immutable copy of the running metrics
///
/// Returned by the accumulator's snapshot operation; holds no references
/// into the accumulator, so callers cannot corrupt the running state
/// through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Count of calls that completed successfully. Failed calls do not
    /// increment this; it tracks billable requests.
    pub total_requests: u64,

    /// Sum of input+output tokens across completed calls
    pub total_tokens: u64,

    /// Sum of per-call costs across completed calls, in USD
    pub total_cost: f64,

    /// Count of calls that failed at the service
    pub errors: u64,

    /// Mean latency over all recorded calls, completed and failed
    pub avg_latency_ms: f64,
}

impl MetricsSnapshot {
    /// Average cost per completed request; zero-request sessions divide by one
    pub fn cost_per_request(&self) -> f64 {
        self.total_cost / self.total_requests.max(1) as f64
    }
}

/// Latency statistics over the full latency history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Mean latency in milliseconds
    pub avg_ms: f64,
    /// Minimum recorded latency
    pub min_ms: f64,
    /// Maximum recorded latency
    pub max_ms: f64,
}

/// Derived health indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// No errors recorded
    Healthy,
    /// At least one call has failed
    Degraded,
}

/// Point-in-time view of a monitoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Running metrics at snapshot time
    pub metrics: MetricsSnapshot,

    /// The most recent traces in insertion order, capped by configuration
    /// (five by default)
    pub recent_traces: Vec<Trace>,

    /// Healthy until the first error is recorded
    pub health_status: HealthStatus,

    /// Total number of traces in the log
    pub total_traces: usize,
}
