//! Error types for the shotcheck review flow.
//!
//! Review errors are discriminated by kind (transport, auth, API status,
//! malformed response) so callers can tell a bad credential from a flaky
//! network without parsing message strings.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for shotcheck operations.
#[derive(Error, Debug)]
pub enum ShotcheckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Review call errors that escape per-image capture
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The API credential could not be resolved
    #[error("Anthropic API key not set. Set the ANTHROPIC_API_KEY environment variable.")]
    MissingApiKey,
}

/// Errors from reviewing a single screenshot, organized by failure kind.
///
/// These are caught at the image level by the runner and rendered as an
/// error string in the report, so one bad screenshot never aborts a batch.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Reading or encoding the screenshot failed
    #[error("Failed to encode {path}: {message}", path = .path.display())]
    Encode { path: PathBuf, message: String },

    /// The HTTP request never completed (DNS, connect, TLS, timeout)
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// The service rejected the credential
    #[error("Authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    /// The service returned a non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be interpreted
    #[error("Malformed response: {message}")]
    Malformed { message: String },
}

/// Convenience type alias for shotcheck results.
pub type Result<T> = std::result::Result<T, ShotcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_distinct_from_api_error() {
        let auth = ReviewError::Auth {
            status: 401,
            message: "invalid x-api-key".to_string(),
        };
        let api = ReviewError::Api {
            status: 500,
            message: "overloaded".to_string(),
        };
        assert!(auth.to_string().contains("Authentication failed"));
        assert!(api.to_string().contains("API error"));
    }

    #[test]
    fn test_encode_error_includes_path() {
        let err = ReviewError::Encode {
            path: PathBuf::from("shots/login.png"),
            message: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("login.png"));
    }
}
