//! Error types for the networking module.

use std::fmt;

use sitebook_core::StoreError;

/// Errors returned by the REST client and the resource API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP request failed.
    Request(String),
    /// Invalid URL provided.
    InvalidUrl(String),
    /// Request timed out.
    Timeout,
    /// Connection refused or failed.
    Connection(String),
    /// Invalid header name or value.
    InvalidHeader(String),
    /// JSON serialization error, or a body that is not JSON.
    Json(String),
    /// The body is JSON but does not have the shape of the requested record.
    Decode {
        /// Record type being decoded.
        resource: &'static str,
        /// Decoder message.
        message: String,
    },
    /// HTTP error status (4xx or 5xx).
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// Error message from the response body, if any.
        message: Option<String>,
    },
    /// A project-scoped call was made with no project selected.
    NoProjectSelected,
    /// The session holds no token and the call requires one.
    NotAuthenticated,
}

impl ApiError {
    /// Whether the failure is transient and the request may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }

    /// The HTTP status, for status errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::InvalidHeader(msg) => write!(f, "Invalid header: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Decode { resource, message } => {
                write!(f, "Could not decode {resource}: {message}")
            }
            Self::HttpStatus { status, message } => {
                if let Some(msg) = message {
                    write!(f, "HTTP {status}: {msg}")
                } else {
                    write!(f, "HTTP {status}")
                }
            }
            Self::NoProjectSelected => write!(f, "No project is selected"),
            Self::NotAuthenticated => write!(f, "Not signed in"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for ApiError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for ApiError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoProjectSelected => Self::NoProjectSelected,
            StoreError::NotAuthenticated => Self::NotAuthenticated,
            other => Self::Request(other.to_string()),
        }
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_message() {
        let err = ApiError::HttpStatus {
            status: 422,
            message: Some("rate must be positive".into()),
        };
        assert_eq!(err.to_string(), "HTTP 422: rate must be positive");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_store_errors_map_to_api_errors() {
        assert_eq!(
            ApiError::from(StoreError::NoProjectSelected),
            ApiError::NoProjectSelected
        );
        assert_eq!(
            ApiError::from(StoreError::NotAuthenticated),
            ApiError::NotAuthenticated
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::Timeout.is_retryable());
        assert!(!ApiError::NoProjectSelected.is_retryable());
    }
}
