use std::time::Duration;
use thiserror::Error;

/// Failures reported by a `RemoteStore`.
///
/// These carry full backend detail and must never be returned past the
/// catalog service; they are logged and mapped to an opaque `AppError`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Remote store timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Remote store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Remote store misconfigured: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Whether a retry has a chance of succeeding
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Timeout { .. } | StoreError::Transport(_) => true,
            StoreError::Status { status, .. } => *status == 429 || *status >= 500,
            StoreError::Decode(_) | StoreError::Configuration(_) => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout {
                after: Duration::ZERO,
            }
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}
