//! Error types for bidsync operations.

use thiserror::Error;

/// Master error type for the synchronization layer.
///
/// Transport failures are produced by the retrying client after its attempt
/// budget is exhausted; application-level rejections (`success: false` in an
/// otherwise healthy response) are surfaced immediately and never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("Transport failure during {operation} after {attempts} attempt(s): {reason}")]
    Transport {
        operation: String,
        attempts: u32,
        reason: String,
    },

    #[error("API rejected {operation}: {message}")]
    ApiRejected { operation: String, message: String },

    #[error("Invalid response for {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl SyncError {
    /// Shorthand for a transport failure with a single attempt.
    pub fn transport(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            attempts: 1,
            reason: reason.into(),
        }
    }

    pub fn rejected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiRejected {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn invalid_response(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for bidsync operations.
pub type SyncResult<T> = Result<T, SyncError>;
