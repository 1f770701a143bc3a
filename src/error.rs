//! Error types for the Drip SDK

use std::time::Duration;
use thiserror::Error;

/// Main error type for the Drip SDK
///
/// HTTP 4xx/5xx responses are *not* errors: they are returned as
/// [`ApiResponse::Error`](crate::ApiResponse) values so callers can branch on
/// the status code and structured reasons without exception handling. This
/// enum covers everything that prevents a request from being sent or
/// completed: bad credentials, failed pre-flight validation, and transport
/// failures.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API key is empty or malformed
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// Access token is empty or malformed
    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    /// Account ID is empty or malformed
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(String),

    /// Neither an API key nor an access token was provided
    #[error("Missing Drip API key or access token")]
    MissingCredentials,

    /// Request parameters failed pre-flight validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error - invalid client setup or parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Request timeout error
    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },
}

/// Error categories for easier error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Client construction and credential errors
    Configuration,
    /// Pre-flight parameter validation errors
    Validation,
    /// Network-related errors (connectivity, timeouts)
    Transport,
    /// Data processing errors (JSON, URLs)
    Processing,
}

impl Error {
    /// Create a new timeout error
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidApiKey(_)
            | Error::InvalidAccessToken(_)
            | Error::InvalidAccountId(_)
            | Error::MissingCredentials
            | Error::Config(_) => ErrorCategory::Configuration,
            Error::InvalidArgument(_) => ErrorCategory::Validation,
            Error::Http(_) | Error::Network(_) | Error::Timeout { .. } => ErrorCategory::Transport,
            Error::Serialization(_) | Error::Url(_) => ErrorCategory::Processing,
        }
    }

    /// Check if the error was raised while constructing the client
    pub fn is_config_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Configuration)
    }

    /// Check if the error was raised by pre-flight parameter validation
    pub fn is_validation_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Validation)
    }

    /// Check if the error is network-related
    pub fn is_transport_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Transport)
    }
}

/// Result type alias for the Drip SDK
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_creation() {
        let error = Error::timeout(Duration::from_secs(30));

        match error {
            Error::Timeout { timeout } => {
                assert_eq!(timeout, Duration::from_secs(30));
            }
            _ => panic!("Expected Timeout error"),
        }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            Error::InvalidApiKey("test".to_string()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::InvalidAccessToken("test".to_string()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::InvalidAccountId("test".to_string()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::MissingCredentials.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::InvalidArgument("test".to_string()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            Error::Network("test".to_string()).category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            Error::timeout(Duration::from_secs(1)).category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            Error::Serialization(serde_json::Error::io(std::io::Error::other("test"))).category(),
            ErrorCategory::Processing
        );
    }

    #[test]
    fn test_category_predicates() {
        assert!(Error::MissingCredentials.is_config_error());
        assert!(!Error::MissingCredentials.is_validation_error());

        assert!(Error::InvalidArgument("test".to_string()).is_validation_error());
        assert!(!Error::InvalidArgument("test".to_string()).is_transport_error());

        assert!(Error::Network("test".to_string()).is_transport_error());
        assert!(!Error::Network("test".to_string()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let error = Error::InvalidApiKey("Missing or invalid Drip API key.".to_string());
        assert!(error
            .to_string()
            .contains("Invalid API key: Missing or invalid Drip API key."));

        let error = Error::MissingCredentials;
        assert_eq!(error.to_string(), "Missing Drip API key or access token");

        let error = Error::timeout(Duration::from_secs(30));
        assert!(error.to_string().contains("Request timeout after 30s"));
    }

    #[test]
    fn test_error_from_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_error.is_err());
        let error: Error = json_error.unwrap_err().into();
        assert!(matches!(error, Error::Serialization(_)));

        let url_error = url::Url::parse("not a url");
        assert!(url_error.is_err());
        let error: Error = url_error.unwrap_err().into();
        assert!(matches!(error, Error::Url(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(Error::MissingCredentials)
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }
}
