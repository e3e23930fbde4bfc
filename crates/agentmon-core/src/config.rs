//! Configuration for a monitoring session

use serde::{Deserialize, Serialize};

use crate::monitor::ModelPricing;

/// Monitor configuration
///
/// One config per [`crate::AgentMonitor`] instance, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Model used by `record_call` when the caller does not name one
    pub default_model: String,

    /// Maximum response-excerpt length in characters before truncation
    pub excerpt_max_chars: usize,

    /// How many recent traces the dashboard snapshot carries
    pub recent_trace_count: usize,

    /// How many recent failed traces the debug report lists
    pub failed_trace_count: usize,

    /// Rate to charge models missing from the pricing table. When `None`
    /// (the default), a pricing miss fails the call with
    /// [`crate::Error::UnknownModel`] instead of silently under- or
    /// over-billing.
    pub default_pricing: Option<ModelPricing>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            default_model: "claude-3-5-sonnet-20241022".to_string(),
            excerpt_max_chars: 200,
            recent_trace_count: 5,
            failed_trace_count: 3,
            default_pricing: None,
        }
    }
}
