//! Monitor module - call instrumentation and trace log
//!
//! The monitor wraps a single generation call end to end: it stamps a start
//! time, invokes the service, measures the elapsed time, finalizes a trace
//! for either outcome, and folds the result into the running metrics.
//! Service failures are swallowed into failed traces; instrumentation never
//! crashes the caller's workflow.

mod metrics;
mod pricing;
mod report;

pub use metrics::MetricsAccumulator;
pub use pricing::{ModelPricing, PricingTable};

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::clock::{elapsed_ms, Clock, SystemClock};
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::models::{excerpt, DashboardSnapshot, MetricsSnapshot, Trace};
use crate::service::GenerationService;

/// Accumulator and trace log behind one lock; the two always update together
struct Inner {
    metrics: MetricsAccumulator,
    traces: Vec<Trace>,
}

/// One monitoring session over a generation service
///
/// Construct one per session, share it (behind an [`Arc`]) across however
/// many concurrent callers you like, and discard it when the session ends.
/// The internal lock is held only for the in-memory update, never across
/// the service call, so concurrent calls overlap freely at the service.
pub struct AgentMonitor {
    config: MonitorConfig,
    clock: Arc<dyn Clock>,
    service: Arc<dyn GenerationService>,
    inner: Mutex<Inner>,
}

impl AgentMonitor {
    /// Create a monitor with default configuration, built-in pricing, and
    /// the system clock
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self::with_config(service, MonitorConfig::default())
    }

    /// Create a monitor with custom configuration
    pub fn with_config(service: Arc<dyn GenerationService>, config: MonitorConfig) -> Self {
        Self::with_clock(service, config, Arc::new(SystemClock))
    }

    /// Create a monitor with an injected clock
    pub fn with_clock(
        service: Arc<dyn GenerationService>,
        config: MonitorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_pricing(service, config, clock, PricingTable::new())
    }

    /// Create a monitor with an explicit pricing table
    pub fn with_pricing(
        service: Arc<dyn GenerationService>,
        config: MonitorConfig,
        clock: Arc<dyn Clock>,
        pricing: PricingTable,
    ) -> Self {
        let default_pricing = config.default_pricing;
        Self {
            config,
            clock,
            service,
            inner: Mutex::new(Inner {
                metrics: MetricsAccumulator::new(pricing, default_pricing),
                traces: Vec::new(),
            }),
        }
    }

    /// Execute and monitor one call using the configured default model
    ///
    /// Always returns a terminal [`Trace`] for service-level outcomes; a
    /// failed generation becomes a `Failed` trace, not an `Err`. The only
    /// error paths are a pricing miss under the strict unknown-model policy
    /// and internal defects.
    pub async fn record_call(&self, agent_name: &str, task: &str) -> Result<Trace> {
        let model = self.config.default_model.clone();
        self.record_call_with_model(agent_name, task, &model).await
    }

    /// Execute and monitor one call against a specific model
    pub async fn record_call_with_model(
        &self,
        agent_name: &str,
        task: &str,
        model_id: &str,
    ) -> Result<Trace> {
        let started_at = self.clock.now();
        let mut trace = Trace::begin(agent_name, task, started_at);

        // No lock across this await: the service call may suspend for
        // however long the backend takes.
        let outcome = self.service.generate(model_id, task).await;
        let latency_ms = elapsed_ms(started_at, self.clock.now());

        match outcome {
            Ok(generation) => {
                let response_excerpt = excerpt(&generation.text, self.config.excerpt_max_chars);
                trace.complete(
                    latency_ms,
                    generation.input_tokens,
                    generation.output_tokens,
                    response_excerpt,
                );

                {
                    let mut inner = self.inner.lock();
                    // Cost is resolved before any mutation; a strict-policy
                    // pricing miss returns here with metrics and log intact.
                    inner.metrics.record_success(
                        model_id,
                        generation.input_tokens,
                        generation.output_tokens,
                        latency_ms,
                    )?;
                    inner.traces.push(trace.clone());
                }

                info!(
                    trace_id = %trace.trace_id,
                    latency_ms,
                    input_tokens = generation.input_tokens,
                    output_tokens = generation.output_tokens,
                    "call completed"
                );
            }
            Err(err) => {
                trace.fail(latency_ms, err.message);

                {
                    let mut inner = self.inner.lock();
                    inner.metrics.record_failure(latency_ms);
                    inner.traces.push(trace.clone());
                }

                warn!(
                    trace_id = %trace.trace_id,
                    latency_ms,
                    error = trace.error_message.as_deref().unwrap_or(""),
                    "call failed"
                );
            }
        }

        Ok(trace)
    }

    /// Point-in-time dashboard view: metrics, recent traces, health
    pub fn dashboard(&self) -> DashboardSnapshot {
        let inner = self.inner.lock();
        report::dashboard(
            self.clock.now(),
            inner.metrics.snapshot(),
            &inner.traces,
            self.config.recent_trace_count,
        )
    }

    /// Human-readable performance report
    pub fn debug_report(&self) -> String {
        let inner = self.inner.lock();
        report::debug_report(
            &inner.metrics.snapshot(),
            inner.metrics.latency_stats(),
            &inner.traces,
            self.config.failed_trace_count,
        )
    }

    /// Immutable copy of the running metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.lock().metrics.snapshot()
    }

    /// Number of traces recorded so far
    pub fn trace_count(&self) -> usize {
        self.inner.lock().traces.len()
    }
}
