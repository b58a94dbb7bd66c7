//! Error type for the trips API client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for API client operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Failure of a single request/response exchange with the trips service.
///
/// Every failure mode surfaces through this one type: the client performs no
/// local recovery, no retry, and no logging of failures. The underlying cause
/// is kept reachable through `source()`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The network call itself failed (connection refused, timeout, etc.)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status
    #[error("API error {status} from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body could not be decoded as JSON
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// HTTP status of the failed exchange, when the service answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = TransportError::Status {
            url: "http://localhost/trips".to_string(),
            status: StatusCode::NOT_FOUND,
            body: "No trips found".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("No trips found"));
    }
}
