//! Error normalizer - maps every transport failure to an `ApiError`
//!
//! DigitalOcean error bodies look like:
//! ```json
//! { "id": "unauthorized", "message": "Unable to authenticate you", "request_id": "..." }
//! ```
//! Some proxies and older endpoints also send `status`/`reason`; those win
//! when present.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::domain::api_error::is_http_status;
use crate::domain::{ApiError, UNKNOWN_REASON};
use crate::ports::TransportError;

/// Structured provider error body
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    status: Option<JsonValue>,
    #[serde(default)]
    reason: Option<String>,
    /// DigitalOcean error identifier, e.g. "unauthorized"
    #[serde(default)]
    id: Option<String>,
}

/// Normalize any transport failure. Total: never panics, never empty.
pub fn normalize(error: &TransportError) -> ApiError {
    match error {
        TransportError::Status {
            status,
            reason,
            body,
            ..
        } => from_error_body(*status, reason.as_deref(), body),
        other => ApiError::new(other.to_string(), 0, UNKNOWN_REASON),
    }
}

/// Normalize a non-2xx response
///
/// # Arguments
/// * `status` - HTTP status of the response
/// * `reason_phrase` - Canonical reason phrase for `status`, if any
/// * `body` - Raw response body (may be empty or non-JSON)
pub fn from_error_body(status: u16, reason_phrase: Option<&str>, body: &str) -> ApiError {
    let status_line = match reason_phrase {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    };

    let parsed = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return ApiError::new(status_line, status, reason_phrase.unwrap_or(UNKNOWN_REASON));
        }
    };

    let status_code = parsed
        .status
        .as_ref()
        .and_then(parse_status)
        .unwrap_or(status);

    let message = non_empty(parsed.message).unwrap_or(status_line);

    let reason = non_empty(parsed.reason)
        .or_else(|| non_empty(parsed.id))
        .or_else(|| reason_phrase.map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_REASON.to_string());

    ApiError::new(message, status_code, reason)
}

fn parse_status(value: &JsonValue) -> Option<u16> {
    let code = match value {
        JsonValue::Number(n) => n.as_u64()?,
        JsonValue::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u16::try_from(code).ok().filter(|c| is_http_status(*c))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
