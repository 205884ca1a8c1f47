//! Result and error types for the core library

use thiserror::Error;

/// Core library error type.
///
/// These are failures detected before any request is made. Failures of the
/// request itself are `ApiError`/`FetchError` values and end up in the
/// module output instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required runtime capability (e.g. the HTTP transport) is unavailable
    #[error("Failed to load the required library ({0})")]
    MissingLibrary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing library error
    pub fn missing_library(name: impl Into<String>) -> Self {
        Self::MissingLibrary(name.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = Error::config("state must be 'present'");
        assert_eq!(err.to_string(), "Configuration error: state must be 'present'");
    }

    #[test]
    fn test_missing_library_message() {
        let err = Error::missing_library("reqwest");
        assert_eq!(err.to_string(), "Failed to load the required library (reqwest)");
    }

    #[test]
    fn test_from_json_error() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
