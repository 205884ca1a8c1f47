//! DigitalOcean HTTP transport
//!
//! Sends authenticated requests to the DigitalOcean API v2 using a blocking
//! reqwest client. One client (and its connection pool) is reused for every
//! request made through a transport instance.
//!
//! API Documentation: https://docs.digitalocean.com/reference/api/api-reference/

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use url::Url;

use crate::domain::Credential;
use crate::ports::{validate_request, HttpMethod, RawResponse, Transport, TransportError};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("docloud/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport
///
/// Host-agnostic: every request carries its full endpoint URL, which the
/// `ApiClient` builds from its configured base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default client.
    ///
    /// Certificate validation stays at reqwest's default (enabled). Timeouts
    /// are applied per request.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client))
    }

    /// Create a transport around a preconfigured client (custom proxy, roots).
    ///
    /// The client should set [`USER_AGENT`]; it is not added per request.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Map request errors to transport errors
    fn map_request_error(&self, error: reqwest::Error, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(timeout)
        } else if error.is_connect() {
            TransportError::Connect(describe(&error))
        } else {
            TransportError::Request(describe(&error))
        }
    }

    /// Split a response into body or status error
    fn read_response(
        &self,
        response: Response,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        let body = response
            .text()
            .map_err(|e| self.map_request_error(e, timeout))?;

        if status.is_success() {
            Ok(RawResponse::new(status.as_u16(), body))
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
                body,
                retry_after,
            })
        }
    }
}

impl Transport for ReqwestTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    fn send(
        &self,
        method: HttpMethod,
        url: &Url,
        credential: &Credential,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        validate_request(url, credential, timeout)?;

        let request = match method {
            HttpMethod::Get => self.client.get(url.clone()),
        };

        tracing::debug!(
            method = method.as_str(),
            host = url.host_str().unwrap_or(""),
            path = url.path(),
            "sending request"
        );

        let response = request
            .bearer_auth(credential.expose())
            .header(ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .map_err(|e| self.map_request_error(e, timeout))?;

        self.read_response(response, timeout)
    }
}

/// Error text including the underlying cause chain
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
