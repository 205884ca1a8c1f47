//! Account service - current account information
//!
//! `GET /v2/account` returns `{ "account": {...} }`. A 2xx without a usable
//! account object is a "not found" failure rather than an empty success.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::client::ApiClient;
use crate::domain::{AccountInfo, AccountResult, FetchError};
use crate::ports::RawResponse;
use crate::services::logging::LogEvent;
use crate::services::normalizer;

pub const ACCOUNT_PATH: &str = "/v2/account";

/// Message reported alongside a successfully fetched account
pub const ACCOUNT_FOUND_MSG: &str = "Current account information";

pub const ACCOUNT_NOT_FOUND_MSG: &str = "Current account information not found";

const OPERATION: &str = "account.get";

/// Resource client for the account endpoint
#[derive(Debug)]
pub struct AccountService {
    client: Arc<ApiClient>,
}

impl AccountService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the authenticated account. Every call hits the API.
    pub fn fetch_account(&self) -> AccountResult {
        let response = self.client.get(ACCOUNT_PATH).map_err(|e| {
            let error = normalizer::normalize(&e);
            LogEvent::new("account_fetch_failed")
                .with_operation(OPERATION)
                .with_status(error.status_code())
                .with_error(error.message())
                .emit();
            FetchError::Api(error)
        })?;

        let result = parse_account(&response);
        match &result {
            Ok(_) => LogEvent::new("account_fetched")
                .with_operation(OPERATION)
                .with_status(response.status)
                .emit(),
            Err(e) => LogEvent::new("account_missing")
                .with_operation(OPERATION)
                .with_status(response.status)
                .with_error(e.to_string())
                .emit(),
        }
        result
    }
}

/// Extract the non-empty `account` object from a success response
fn parse_account(response: &RawResponse) -> AccountResult {
    let value = match response.json() {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "account response is not valid JSON");
            return Err(not_found());
        }
    };

    match value.get("account") {
        Some(JsonValue::Object(fields)) if !fields.is_empty() => {
            Ok(AccountInfo::from_map(fields.clone()))
        }
        _ => Err(not_found()),
    }
}

fn not_found() -> FetchError {
    FetchError::NotFound(ACCOUNT_NOT_FOUND_MSG.to_string())
}
