//! Centralized error types for Cromaticar.

use std::time::Duration;

use thiserror::Error;

/// Main error type for catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The collaborator was unreachable or answered with a non-2xx status.
    #[error("{message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Malformed color: {0}")]
    MalformedColor(String),

    #[error("Record has no identifier")]
    MissingIdentifier,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid {field} selection: '{value}'")]
    InvalidSelection { field: &'static str, value: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Create an error for a non-2xx HTTP response.
    pub fn http(status: u16, body: impl AsRef<str>) -> Self {
        let body = body.as_ref().trim();
        let message = if body.is_empty() {
            format!("HTTP error! status: {}", status)
        } else {
            format!("HTTP error! status: {} ({})", status, body)
        };
        Self::Network {
            status: Some(status),
            message,
        }
    }

    /// Create an error for an unreachable collaborator.
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a malformed color error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedColor(msg.into())
    }

    /// Create an invalid selection error.
    pub fn invalid_selection(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            field,
            value: value.into(),
        }
    }

    /// HTTP status carried by a network failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Message suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { status: Some(status), .. } => {
                format!("The catalog service failed with HTTP status {}. Try searching again.", status)
            }
            Self::Network { status: None, .. } => {
                "The catalog service is unreachable. Check your connection and search again.".to_string()
            }
            Self::Timeout(_) => "The catalog service took too long to answer. Try searching again.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_carries_status() {
        let err = CatalogError::http(500, "");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert!(err.user_message().contains("500"));
    }

    #[test]
    fn test_http_error_keeps_body() {
        let err = CatalogError::http(503, " maintenance \n");
        assert_eq!(err.to_string(), "HTTP error! status: 503 (maintenance)");
    }

    #[test]
    fn test_unreachable_has_no_status() {
        let err = CatalogError::unreachable("connection refused");
        assert_eq!(err.status(), None);
        assert!(err.user_message().contains("unreachable"));
    }

    #[test]
    fn test_timeout_message() {
        let err = CatalogError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Request timed out after 10s");
    }
}
