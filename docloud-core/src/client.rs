//! Control-plane API client
//!
//! Holds the credential, the client configuration and the transport. Stateless
//! across calls and safe to share between threads. Every request URL is built
//! from the configured base URL; the transport only carries bytes.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::domain::result::Result;
use crate::domain::Credential;
use crate::ports::{endpoint_url, HttpMethod, RawResponse, Transport, TransportError};
use crate::services::LogEvent;

pub struct ApiClient {
    credential: Credential,
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client. No I/O happens here.
    pub fn new(
        credential: Credential,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            credential,
            config,
            transport,
        })
    }

    /// GET `path` under the configured base URL, retrying per the configured
    /// policy.
    ///
    /// With the default (disabled) policy this is exactly one transport call.
    pub fn get(&self, path: &str) -> std::result::Result<RawResponse, TransportError> {
        let url = endpoint_url(&self.config.base_url, path)?;
        let policy = self.config.retry;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let result = self.transport.send(
                HttpMethod::Get,
                &url,
                &self.credential,
                self.config.timeout,
            );

            match result {
                Ok(response) => return Ok(response),
                Err(error) if policy.should_retry(attempt, &error) => {
                    let delay = policy.backoff(attempt, error.retry_after());
                    LogEvent::new("request_retry")
                        .with_operation(path)
                        .with_status(error.status().unwrap_or(0))
                        .with_attempt(attempt)
                        .with_error(error.to_string())
                        .emit();
                    std::thread::sleep(delay);
                }
                Err(error) => return Err(error),
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("credential", &self.credential)
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .finish()
    }
}
