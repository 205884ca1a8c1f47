//! HTTP transport port
//!
//! Defines the interface for sending one authenticated request to the
//! control-plane API. The reqwest adapter is the production implementation;
//! tests substitute their own.

use std::time::Duration;

use serde_json::Value as JsonValue;
use thiserror::Error;
use url::Url;

use crate::domain::Credential;

/// HTTP method of a control-plane request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Result<JsonValue> {
        serde_json::from_str(&self.body)
    }
}

/// Failure of a single transport attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request rejected before touching the network
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unable to connect to the DigitalOcean API: {0}")]
    Connect(String),

    #[error("Connection timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}{}", .reason.as_deref().map(|r| format!(" {}", r)).unwrap_or_default())]
    Status {
        status: u16,
        /// Canonical reason phrase for the status, if known
        reason: Option<String>,
        body: String,
        /// `Retry-After` header in seconds, if sent
        retry_after: Option<u64>,
    },

    #[error("DigitalOcean API request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// HTTP status, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            TransportError::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Whether a later identical attempt might succeed:
    /// 429, 5xx, connection failures and timeouts
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Connect(_) | TransportError::Timeout(_) => true,
            TransportError::Status { status, .. } => *status == 429 || *status >= 500,
            TransportError::InvalidRequest(_) | TransportError::Request(_) => false,
        }
    }
}

/// Transport for control-plane requests
///
/// Implementations make exactly one network attempt per call and must be
/// safe to share between threads.
pub trait Transport: Send + Sync {
    /// Transport name (e.g., "reqwest")
    fn name(&self) -> &str;

    /// Send one request
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `url` - Absolute endpoint URL, e.g. `https://api.digitalocean.com/v2/account`
    /// * `credential` - Bearer token sent in the `Authorization` header
    /// * `timeout` - Upper bound for the whole request, must be non-zero
    fn send(
        &self,
        method: HttpMethod,
        url: &Url,
        credential: &Credential,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

/// Join an API root and an absolute API path into an endpoint URL
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, TransportError> {
    if !path.starts_with('/') || path.chars().any(char::is_whitespace) {
        return Err(TransportError::InvalidRequest(format!("malformed path '{}'", path)));
    }
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined)
        .map_err(|e| TransportError::InvalidRequest(format!("malformed URL '{}': {}", joined, e)))
}

/// Check the input constraints shared by all transports
pub fn validate_request(
    url: &Url,
    credential: &Credential,
    timeout: Duration,
) -> Result<(), TransportError> {
    if credential.expose().is_empty() {
        return Err(TransportError::InvalidRequest("credential is empty".to_string()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidRequest(format!(
            "unsupported URL scheme '{}'",
            url.scheme()
        )));
    }
    if timeout.is_zero() {
        return Err(TransportError::InvalidRequest(
            "timeout must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
