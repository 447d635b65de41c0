//! Domain Errors
//!
//! Error types for host and plugin operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    #[error("Invalid extent: {0}")]
    InvalidExtent(String),
}

/// Errors raised by a single search call
///
/// Every variant is scoped to the call that produced it; none of them
/// leave the provider unusable.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Service error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Search was cancelled")]
    Cancelled,
}

impl SearchError {
    /// Cancellations are user-driven interruptions, not failures.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(SearchError::Cancelled.is_cancelled());
        assert!(!SearchError::Transport("connection refused".into()).is_cancelled());
        assert!(!SearchError::MalformedResponse("eof".into()).is_cancelled());
    }

    #[test]
    fn test_status_display() {
        let err = SearchError::Status {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "Service error (502): Bad Gateway");
    }
}
