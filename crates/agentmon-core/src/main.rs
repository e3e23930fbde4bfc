//! Agentmon demo CLI
//!
//! Runs a handful of example tasks against a mock generation service and
//! prints the monitoring dashboard and the performance debug report. Wire a
//! real [`agentmon::service::GenerationService`] implementation in place of
//! the mock to monitor actual calls.

use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use rand::Rng;

use agentmon::service::{Generation, GenerationService, ServiceError};
use agentmon::{AgentMonitor, MonitorConfig};

/// Agentmon - Observability for AI agent calls
#[derive(Parser)]
#[command(name = "agentmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of demo tasks to run
    #[arg(long, default_value = "3")]
    tasks: usize,

    /// Fail every Nth call to demonstrate error handling (0 disables)
    #[arg(long, default_value = "0")]
    fail_every: usize,

    /// Model identifier to charge the demo calls against
    #[arg(long, default_value = "claude-3-5-sonnet-20241022", env = "AGENTMON_MODEL")]
    model: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Mock generation backend with jittered latency and token counts
struct MockService {
    fail_every: usize,
    calls: AtomicUsize,
}

impl MockService {
    fn new(fail_every: usize) -> Self {
        Self {
            fail_every,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerationService for MockService {
    async fn generate(
        &self,
        _model_id: &str,
        prompt: &str,
    ) -> std::result::Result<Generation, ServiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        // ThreadRng is not Send; draw everything before suspending
        let (delay_ms, output_tokens) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(40..180u64), rng.gen_range(80..400u64))
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        if self.fail_every != 0 && call % self.fail_every == 0 {
            return Err(ServiceError::new("rate limited (simulated)"));
        }

        let input_tokens = prompt.split_whitespace().count() as u64 + 12;
        Ok(Generation {
            input_tokens,
            output_tokens,
            text: format!(
                "Mock response to {prompt:?}: monitoring, cost tracking, and \
                 tracing are the foundation of operable AI systems. This \
                 response is long enough to exercise excerpt truncation in \
                 the recorded trace when the generator gets chatty about it."
            ),
        })
    }
}

const DEMO_TASKS: &[&str] = &[
    "What are the top 3 best practices for monitoring AI systems?",
    "Explain the importance of cost tracking in production AI deployments.",
    "How can distributed tracing improve AI agent debugging?",
];

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let service = Arc::new(MockService::new(cli.fail_every));
    let config = MonitorConfig {
        default_model: cli.model,
        ..MonitorConfig::default()
    };
    let monitor = AgentMonitor::with_config(service, config);

    println!("Starting Agent Monitor Demo...\n");

    for (i, task) in DEMO_TASKS.iter().cycle().take(cli.tasks).enumerate() {
        let preview: String = task.chars().take(50).collect();
        println!("Running Task {}: {preview}...", i + 1);

        let trace = monitor.record_call("ai-assistant", task).await?;
        println!(
            "Status: {} | Latency: {:.1}ms\n",
            trace.status.as_str(),
            trace.latency_ms
        );
    }

    println!("\n{}", "=".repeat(50));
    println!("MONITORING DASHBOARD");
    println!("{}", "=".repeat(50));
    let dashboard = monitor.dashboard();
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    println!("\n{}", monitor.debug_report());

    Ok(())
}
