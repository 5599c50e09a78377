//! Application error types
//!
//! The engine distinguishes three recoverable failure classes: malformed
//! input (`Validation`), transport failures (`Network`/`Timeout`) and
//! collaborator-reported failures (`Service`). None of them terminate the
//! engine; everything except validation is retryable with the same input.

use thiserror::Error;

fn format_timeout(seconds: &Option<u64>) -> String {
    match seconds {
        Some(s) => format!(" after {s}s"),
        None => String::new(),
    }
}

/// Error produced by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed analyzer payload (e.g. missing issue array). Fails fast,
    /// surfaced as report-unavailable; not retryable without new input.
    #[error("Invalid analyzer payload: {0}")]
    Validation(String),

    /// Connectivity failure on an async collaborator call.
    #[error("Network error: {0}")]
    Network(String),

    /// A collaborator call exceeded its timeout. The duration is absent when
    /// the transport reported the timeout without one.
    #[error("Request timed out{}", format_timeout(.seconds))]
    Timeout { seconds: Option<u64> },

    /// The collaborator answered with `success: false` and a message.
    #[error("Service error: {0}")]
    Service(String),

    /// A correction submission was attempted while another is in flight.
    #[error("A correction submission is already in progress")]
    SubmissionInFlight,

    /// The correction state machine rejected the requested transition.
    #[error(transparent)]
    Transition(#[from] crate::domain::report::CorrectionTransitionError),

    /// Response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl EngineError {
    /// Check if this error is retryable with the same input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::Network(_) | EngineError::Timeout { .. } | EngineError::Service(_)
        )
    }

    /// Create a timeout error for a known duration.
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout {
            seconds: Some(seconds),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a service error from a collaborator-provided message.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not report which timeout tripped.
            EngineError::Timeout { seconds: None }
        } else if err.is_connect() {
            EngineError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            EngineError::InvalidResponse(err.to_string())
        } else {
            EngineError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}
