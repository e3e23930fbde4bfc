//! Data models for Agentmon

mod metrics;
mod trace;

pub use metrics::*;
pub use trace::*;

pub(crate) use trace::excerpt;
