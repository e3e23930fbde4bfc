//! Error types for Agentmon

use thiserror::Error;

/// Result type alias using Agentmon's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Agentmon operations
///
/// Service-level failures are deliberately absent here: a failed generation
/// call is captured into a failed trace by the monitor and never raised.
/// These variants cover the caller-visible failures only.
#[derive(Error, Debug)]
pub enum Error {
    /// No pricing entry for the model and no default pricing configured
    #[error("no pricing entry for model: {model}")]
    UnknownModel {
        /// The model identifier that failed the pricing lookup
        model: String,
    },

    /// Internal invariant violation; indicates a bug, not a recoverable state
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown-model error
    pub fn unknown_model(model: impl Into<String>) -> Self {
        Self::UnknownModel {
            model: model.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
