//! Concurrent callers share one accumulator and trace log; no update may be
//! lost when calls overlap.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use agentmon::service::{Generation, GenerationService, ServiceError};
use agentmon::AgentMonitor;

/// Always succeeds after a short suspend, forcing calls to interleave
struct FixedService;

#[async_trait]
impl GenerationService for FixedService {
    async fn generate(
        &self,
        _model_id: &str,
        _prompt: &str,
    ) -> Result<Generation, ServiceError> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(Generation {
            input_tokens: 100,
            output_tokens: 50,
            text: "ok".to_string(),
        })
    }
}

/// Fails every second call
struct FlakyService {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationService for FlakyService {
    async fn generate(
        &self,
        _model_id: &str,
        _prompt: &str,
    ) -> Result<Generation, ServiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(1)).await;
        if call % 2 == 0 {
            Ok(Generation {
                input_tokens: 10,
                output_tokens: 10,
                text: "ok".to_string(),
            })
        } else {
            Err(ServiceError::new("rate limited"))
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_successes_lose_no_updates() {
    const N: usize = 32;
    let monitor = Arc::new(AgentMonitor::new(Arc::new(FixedService)));

    let mut handles = Vec::new();
    for i in 0..N {
        let monitor = monitor.clone();
        handles.push(tokio::spawn(async move {
            monitor
                .record_call("worker", &format!("task {i}"))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let metrics = monitor.metrics();
    assert_eq!(metrics.total_requests, N as u64);
    assert_eq!(metrics.errors, 0);
    assert_eq!(metrics.total_tokens, N as u64 * 150);
    assert_eq!(monitor.trace_count(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_mixed_outcomes_fill_exactly_one_bucket_each() {
    const N: usize = 30;
    let service = Arc::new(FlakyService {
        calls: AtomicUsize::new(0),
    });
    let monitor = Arc::new(AgentMonitor::new(service));

    let mut handles = Vec::new();
    for i in 0..N {
        let monitor = monitor.clone();
        handles.push(tokio::spawn(async move {
            monitor
                .record_call("worker", &format!("task {i}"))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let metrics = monitor.metrics();
    assert_eq!(metrics.total_requests + metrics.errors, N as u64);
    assert_eq!(metrics.total_requests, (N / 2) as u64);
    assert_eq!(metrics.errors, (N / 2) as u64);
    assert_eq!(monitor.trace_count(), N);
}
