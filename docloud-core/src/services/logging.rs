//! Logging service - structured, privacy-safe event logging
//!
//! Events are emitted through `tracing`. No tokens or account payloads are
//! ever logged: events carry only an event name, the operation, status codes,
//! attempt numbers and error messages.
//!
//! Output always goes to stderr so stdout stays a clean JSON channel for the
//! Ansible module protocol.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter directive (e.g. "debug")
pub const LOG_ENV: &str = "DOCLOUD_LOG";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected pretty or json)", other)),
        }
    }
}

/// Install the global subscriber.
///
/// `DOCLOUD_LOG` wins over `level`; an unparseable filter falls back to "warn".
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(stderr_is_terminal()),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

fn stderr_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            operation: None,
            status_code: None,
            attempt: None,
            error_message: None,
        }
    }

    /// Set the operation context (e.g. "account.get")
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set the HTTP status; 0 means no response was received
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Emit the event: warn when it carries an error, info otherwise
    pub fn emit(&self) {
        let operation = self.operation.as_deref().unwrap_or("");
        match &self.error_message {
            Some(error) => tracing::warn!(
                event = %self.event,
                operation,
                status_code = ?self.status_code,
                attempt = ?self.attempt,
                error = %error,
                "{}", self.event
            ),
            None => tracing::info!(
                event = %self.event,
                operation,
                status_code = ?self.status_code,
                attempt = ?self.attempt,
                "{}", self.event
            ),
        }
    }
}
