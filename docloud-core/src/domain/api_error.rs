//! Normalized API failures and the fetch result type

use thiserror::Error;

use super::AccountInfo;

/// Reason used when neither the provider nor the transport supplied one
pub const UNKNOWN_REASON: &str = "unknown";

const FALLBACK_MESSAGE: &str = "Unknown DigitalOcean API error";

/// Uniform error value for every failed API call.
///
/// `status_code` is a valid HTTP status when a response was received and `0`
/// when the failure happened below HTTP (DNS, connect, timeout). Built only
/// through `new`, so the message and reason are never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status_code: u16,
    reason: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: u16, reason: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };

        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            UNKNOWN_REASON.to_string()
        } else {
            reason
        };

        let status_code = if is_http_status(status_code) { status_code } else { 0 };

        Self {
            message,
            status_code,
            reason,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, or `0` when no response was received
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Valid HTTP status range
pub fn is_http_status(code: u16) -> bool {
    (100..=599).contains(&code)
}

/// Failure of a resource fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The call succeeded but the expected object was missing
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of fetching the current account
pub type AccountResult = std::result::Result<AccountInfo, FetchError>;
