//! Custom error types for the common library
//!
//! This module defines the errors raised while talking to an upstream REST
//! API. Callers decide how each variant maps onto their own responses.

use thiserror::Error;

/// Custom error type for upstream API calls
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream answered 404 for the requested resource
    #[error("{0} not found")]
    NotFound(String),

    /// The upstream answered with a non-success status other than 404
    #[error("upstream status {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// Connection, TLS or body transfer failure
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The body was not the JSON shape we expected
    #[error("failed to decode upstream JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The client could not be built from its configuration
    #[error("invalid upstream configuration: {0}")]
    Configuration(String),
}

impl UpstreamError {
    /// Whether the upstream reported the resource as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Type alias for Result with UpstreamError
pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UpstreamError::NotFound("users/ghost".to_string()).to_string(),
            "users/ghost not found"
        );
        assert_eq!(UpstreamError::Status(503).to_string(), "upstream status 503");
        assert!(UpstreamError::NotFound(String::new()).is_not_found());
        assert!(!UpstreamError::Timeout.is_not_found());
    }
}
