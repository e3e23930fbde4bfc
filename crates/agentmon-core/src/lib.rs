//! # Agentmon
//!
//! Embeddable observability layer for AI agent calls.
//!
//! Agentmon wraps calls to a text-generation service, records a trace per
//! call, and keeps running aggregates (request count, token usage, cost,
//! error count, latency statistics) that feed a dashboard snapshot and a
//! debug report. The underlying service client is untouched: callers hand
//! the monitor a [`service::GenerationService`] implementation and route
//! their calls through [`monitor::AgentMonitor::record_call`].
//!
//! ## Architecture
//!
//! - **Monitor**: wraps one call at a time, builds the trace, owns the log
//! - **Metrics**: running accumulator with cost computation from a pricing table
//! - **Reporting**: dashboard snapshot and human-readable debug report
//!
//! ## Quick Start
//!
//! ```ignore
//! let monitor = AgentMonitor::new(service);
//! let trace = monitor.record_call("ai-assistant", "Summarize this doc").await?;
//! println!("{}", monitor.debug_report());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod monitor;
pub mod service;

pub use config::MonitorConfig;
pub use error::{Error, Result};
pub use monitor::AgentMonitor;

/// Re-exports for convenience
pub mod prelude {
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::config::MonitorConfig;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::monitor::{AgentMonitor, ModelPricing, PricingTable};
    pub use crate::service::{Generation, GenerationService, ServiceError};
}
