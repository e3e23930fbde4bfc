//! Running-metrics accumulator
//!
//! Owns the running totals and the latency history. All mutation goes
//! through `record_success` and `record_failure`; readers get owned
//! snapshots only.

use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{LatencyStats, MetricsSnapshot};

use super::pricing::{ModelPricing, PricingTable};

/// Accumulates per-call measurements into session-level aggregates
///
/// The latency history is unbounded and grows by one entry per recorded
/// call; fine for the short-lived sessions this is built for, a scalability
/// limit for long-running ones.
pub struct MetricsAccumulator {
    pricing: PricingTable,
    default_pricing: Option<ModelPricing>,
    totals: MetricsSnapshot,
    latencies: Vec<f64>,
}

impl MetricsAccumulator {
    /// Create a fresh accumulator
    ///
    /// `default_pricing` decides the unknown-model policy: `Some(rate)`
    /// charges missing models at that rate (with a warning), `None` makes
    /// `record_success` fail with [`Error::UnknownModel`].
    pub fn new(pricing: PricingTable, default_pricing: Option<ModelPricing>) -> Self {
        Self {
            pricing,
            default_pricing,
            totals: MetricsSnapshot {
                total_requests: 0,
                total_tokens: 0,
                total_cost: 0.0,
                errors: 0,
                avg_latency_ms: 0.0,
            },
            latencies: Vec::new(),
        }
    }

    /// Record a completed call
    ///
    /// The cost is resolved before any field is touched, so a pricing miss
    /// under the strict policy leaves the accumulator unchanged.
    pub fn record_success(
        &mut self,
        model_id: &str,
        input_tokens: u64,
        output_tokens: u64,
        latency_ms: f64,
    ) -> Result<()> {
        let cost = self.resolve_cost(model_id, input_tokens, output_tokens)?;

        self.latencies.push(latency_ms);
        self.totals.total_requests += 1;
        self.totals.total_tokens += input_tokens + output_tokens;
        self.totals.total_cost += cost;
        self.recompute_avg();
        Ok(())
    }

    /// Record a failed call
    pub fn record_failure(&mut self, latency_ms: f64) {
        self.latencies.push(latency_ms);
        self.totals.errors += 1;
        self.recompute_avg();
    }

    /// Immutable copy of the current totals
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.totals.clone()
    }

    /// Avg/min/max over the full latency history, `None` when empty
    pub fn latency_stats(&self) -> Option<LatencyStats> {
        if self.latencies.is_empty() {
            return None;
        }

        let mut min_ms = f64::INFINITY;
        let mut max_ms = f64::NEG_INFINITY;
        for &latency in &self.latencies {
            min_ms = min_ms.min(latency);
            max_ms = max_ms.max(latency);
        }

        Some(LatencyStats {
            avg_ms: self.totals.avg_latency_ms,
            min_ms,
            max_ms,
        })
    }

    /// Number of calls recorded so far, completed and failed
    pub fn recorded_calls(&self) -> usize {
        self.latencies.len()
    }

    fn resolve_cost(&self, model_id: &str, input_tokens: u64, output_tokens: u64) -> Result<f64> {
        if let Some(pricing) = self.pricing.get(model_id) {
            return Ok(pricing.cost(input_tokens, output_tokens));
        }

        match self.default_pricing {
            Some(fallback) => {
                warn!(model = model_id, "no pricing entry, charging at default rate");
                Ok(fallback.cost(input_tokens, output_tokens))
            }
            None => Err(Error::unknown_model(model_id)),
        }
    }

    fn recompute_avg(&mut self) {
        let sum: f64 = self.latencies.iter().sum();
        self.totals.avg_latency_ms = sum / self.latencies.len() as f64;
    }
}
