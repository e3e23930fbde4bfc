//! Generation service contract
//!
//! The monitor treats the text-generation service as an opaque capability:
//! submit a prompt with a model identifier, receive token counts and
//! response text, or fail with a message. Cancellation and timeouts are the
//! service implementation's responsibility; the monitor only measures how
//! long the call took.

use async_trait::async_trait;

/// Result of a successful generation call
#[derive(Debug, Clone)]
pub struct Generation {
    /// Tokens consumed by the prompt
    pub input_tokens: u64,

    /// Tokens produced in the response
    pub output_tokens: u64,

    /// The response text
    pub text: String,
}

/// Failure reported by the generation service
///
/// Never escapes [`crate::monitor::AgentMonitor::record_call`]; it is
/// converted into a failed trace and an incremented error counter.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    /// Human-readable description of the failure
    pub message: String,
}

impl ServiceError {
    /// Create a new service error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A text-generation backend the monitor can wrap
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit `prompt` to `model_id` and wait for the result
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> std::result::Result<Generation, ServiceError>;
}
