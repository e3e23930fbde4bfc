//! Reporting views over accumulated state
//!
//! Pure functions: they read the metrics snapshot and the trace log, mutate
//! nothing, and produce the same output for the same inputs.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::models::{
    DashboardSnapshot, HealthStatus, LatencyStats, MetricsSnapshot, Trace, TraceStatus,
};

/// Build a dashboard snapshot from the current state
pub(crate) fn dashboard(
    timestamp: DateTime<Utc>,
    metrics: MetricsSnapshot,
    traces: &[Trace],
    recent_count: usize,
) -> DashboardSnapshot {
    let start = traces.len().saturating_sub(recent_count);
    let health_status = if metrics.errors == 0 {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    DashboardSnapshot {
        timestamp,
        metrics,
        recent_traces: traces[start..].to_vec(),
        health_status,
        total_traces: traces.len(),
    }
}

/// Render the human-readable performance report
pub(crate) fn debug_report(
    metrics: &MetricsSnapshot,
    latency_stats: Option<LatencyStats>,
    traces: &[Trace],
    failed_count: usize,
) -> String {
    if traces.is_empty() {
        return "No traces recorded yet".to_string();
    }

    let successful = traces
        .iter()
        .filter(|t| t.status == TraceStatus::Completed)
        .count();
    let failed = traces
        .iter()
        .filter(|t| t.status == TraceStatus::Failed)
        .count();
    let success_rate = successful as f64 / traces.len() as f64 * 100.0;

    let mut report = String::new();
    let _ = writeln!(report, "=== Agent Performance Debug Report ===");
    let _ = writeln!(report, "Total Requests: {}", traces.len());
    let _ = writeln!(report, "Successful: {successful}");
    let _ = writeln!(report, "Failed: {failed}");
    let _ = writeln!(report, "Success Rate: {success_rate:.1}%");
    report.push('\n');

    let _ = writeln!(report, "Cost Analysis:");
    let _ = writeln!(report, "- Total Cost: ${:.4}", metrics.total_cost);
    let _ = writeln!(report, "- Total Tokens: {}", metrics.total_tokens);
    let _ = writeln!(
        report,
        "- Cost per Request: ${:.4}",
        metrics.cost_per_request()
    );
    report.push('\n');

    let _ = writeln!(report, "Performance:");
    match latency_stats {
        Some(stats) => {
            let _ = writeln!(report, "- Average Latency: {:.1}ms", stats.avg_ms);
            let _ = writeln!(report, "- Min Latency: {:.1}ms", stats.min_ms);
            let _ = writeln!(report, "- Max Latency: {:.1}ms", stats.max_ms);
        }
        None => {
            let _ = writeln!(report, "- No latency data recorded");
        }
    }

    let recent_failures: Vec<&Trace> = traces
        .iter()
        .filter(|t| t.status == TraceStatus::Failed)
        .collect();
    if !recent_failures.is_empty() {
        report.push('\n');
        let _ = writeln!(report, "Recent Errors:");
        let start = recent_failures.len().saturating_sub(failed_count);
        for trace in &recent_failures[start..] {
            let message = trace.error_message.as_deref().unwrap_or("Unknown error");
            let _ = writeln!(report, "- {}: {}", trace.trace_id, message);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn trace_at(agent: &str, millis: i64) -> Trace {
        Trace::begin(agent, "task", Utc.timestamp_millis_opt(millis).unwrap())
    }

    fn completed(agent: &str, millis: i64) -> Trace {
        let mut t = trace_at(agent, millis);
        t.complete(10.0, 100, 50, "ok".to_string());
        t
    }

    fn failed(agent: &str, millis: i64, message: &str) -> Trace {
        let mut t = trace_at(agent, millis);
        t.fail(10.0, message.to_string());
        t
    }

    fn metrics() -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: 2,
            total_tokens: 300,
            total_cost: 0.0105,
            errors: 1,
            avg_latency_ms: 10.0,
        }
    }

    #[test]
    fn dashboard_caps_recent_traces_and_keeps_order() {
        let traces: Vec<Trace> = (0..8).map(|i| completed("agent", 1000 + i)).collect();
        let snapshot = dashboard(Utc::now(), metrics(), &traces, 5);

        assert_eq!(snapshot.recent_traces.len(), 5);
        assert_eq!(snapshot.total_traces, 8);
        // Oldest of the five first
        assert_eq!(snapshot.recent_traces[0].trace_id, "agent_1003");
        assert_eq!(snapshot.recent_traces[4].trace_id, "agent_1007");
    }

    #[test]
    fn dashboard_with_short_log_returns_everything() {
        let traces = vec![completed("agent", 1000)];
        let snapshot = dashboard(Utc::now(), metrics(), &traces, 5);
        assert_eq!(snapshot.recent_traces.len(), 1);
    }

    #[test]
    fn health_flips_on_first_error() {
        let healthy = MetricsSnapshot {
            errors: 0,
            ..metrics()
        };
        let traces = vec![completed("agent", 1000)];

        assert_eq!(
            dashboard(Utc::now(), healthy, &traces, 5).health_status,
            HealthStatus::Healthy
        );
        assert_eq!(
            dashboard(Utc::now(), metrics(), &traces, 5).health_status,
            HealthStatus::Degraded
        );
    }

    #[test]
    fn empty_log_reports_no_traces() {
        let empty = MetricsSnapshot {
            total_requests: 0,
            total_tokens: 0,
            total_cost: 0.0,
            errors: 0,
            avg_latency_ms: 0.0,
        };
        assert_eq!(debug_report(&empty, None, &[], 3), "No traces recorded yet");
    }

    #[test]
    fn report_includes_counts_and_latency() {
        let traces = vec![
            completed("agent", 1000),
            completed("agent", 1001),
            failed("agent", 1002, "rate limited"),
        ];
        let stats = LatencyStats {
            avg_ms: 10.0,
            min_ms: 5.0,
            max_ms: 20.0,
        };
        let report = debug_report(&metrics(), Some(stats), &traces, 3);

        assert!(report.contains("Total Requests: 3"));
        assert!(report.contains("Successful: 2"));
        assert!(report.contains("Failed: 1"));
        assert!(report.contains("Success Rate: 66.7%"));
        assert!(report.contains("- Total Cost: $0.0105"));
        assert!(report.contains("- Average Latency: 10.0ms"));
        assert!(report.contains("- agent_1002: rate limited"));
    }

    #[test]
    fn report_lists_only_most_recent_failures() {
        let traces: Vec<Trace> = (0..5)
            .map(|i| failed("agent", 1000 + i, &format!("error {i}")))
            .collect();
        let report = debug_report(&metrics(), None, &traces, 3);

        assert!(!report.contains("error 0"));
        assert!(!report.contains("error 1"));
        assert!(report.contains("error 2"));
        assert!(report.contains("error 3"));
        assert!(report.contains("error 4"));
    }
}
