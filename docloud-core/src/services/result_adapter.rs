//! Result adapter - converts fetch results into Ansible module output
//!
//! ```json
//! {"changed": false, "msg": "Current account information", "account": {...}}
//! {"changed": false, "failed": true, "msg": "Current account information not found"}
//! {"changed": false, "failed": true, "msg": "Unauthorized",
//!  "error": {"Message": "Unauthorized", "Status Code": 401, "Reason": "Unauthorized"}}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::result::Error;
use crate::domain::{AccountInfo, AccountResult, ApiError, FetchError};
use crate::services::account::ACCOUNT_FOUND_MSG;

/// Module result as printed to the Ansible runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutput {
    /// Always false: info modules never change anything
    pub changed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    /// Underlying cause of a missing-library failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

/// Error dictionary in the collection's key style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Status Code")]
    pub status_code: u16,
    #[serde(rename = "Reason")]
    pub reason: String,
}

impl From<&ApiError> for ErrorDetail {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.message().to_string(),
            status_code: error.status_code(),
            reason: error.reason().to_string(),
        }
    }
}

impl ModuleOutput {
    pub fn success(account: AccountInfo) -> Self {
        Self {
            changed: false,
            failed: false,
            msg: ACCOUNT_FOUND_MSG.to_string(),
            account: Some(account),
            error: None,
            exception: None,
        }
    }

    /// Failure with a message only
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            failed: true,
            msg: msg.into(),
            account: None,
            error: None,
            exception: None,
        }
    }

    pub fn api_failure(error: &ApiError) -> Self {
        Self {
            error: Some(ErrorDetail::from(error)),
            ..Self::failure(error.message())
        }
    }

    /// Failure detected before any request was made
    pub fn config_failure(error: &Error) -> Self {
        let msg = match error {
            Error::Config(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self::failure(msg)
    }

    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

impl From<AccountResult> for ModuleOutput {
    fn from(result: AccountResult) -> Self {
        match result {
            Ok(account) => Self::success(account),
            Err(FetchError::NotFound(msg)) => Self::failure(msg),
            Err(FetchError::Api(error)) => Self::api_failure(&error),
        }
    }
}
