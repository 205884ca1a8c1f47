//! Configuration management
//!
//! Module parameters arrive as the Ansible arguments JSON:
//! ```json
//! { "token": "dop_v1_...", "state": "present", "timeout": 300 }
//! ```
//! Anything not given there falls back to environment variables, then to
//! defaults.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::Credential;
use crate::services::RetryPolicy;

/// Default production API URL
pub const DIGITALOCEAN_PRODUCTION_URL: &str = "https://api.digitalocean.com";

/// Environment variable to override the API base URL (staging, mock servers)
pub const DIGITALOCEAN_BASE_URL_ENV: &str = "DIGITALOCEAN_BASE_URL";

/// Environment variables consulted, in order, when no token is given
pub const TOKEN_ENV_VARS: [&str; 6] = [
    "DIGITALOCEAN_ACCESS_TOKEN",
    "DIGITALOCEAN_TOKEN",
    "DO_API_TOKEN",
    "DO_API_KEY",
    "DO_OAUTH_TOKEN",
    "OAUTH_TOKEN",
];

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Key Ansible wraps module arguments in when writing the args file
const ANSIBLE_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Get the API base URL, checking environment variable first
pub fn get_base_url() -> String {
    std::env::var(DIGITALOCEAN_BASE_URL_ENV)
        .unwrap_or_else(|_| DIGITALOCEAN_PRODUCTION_URL.to_string())
}

/// Transport-facing client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: get_base_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::disabled(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Reject configurations that could hang or hit the wrong host
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        validate_base_url(&self.base_url)
    }
}

/// Base URL must be an absolute http(s) URL without credentials
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::config(format!("invalid base URL '{}': {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(Error::config("base URL must not embed credentials"));
    }
    Ok(())
}

/// Desired module state. Only `present` is supported for info modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    Present,
}

impl ModuleState {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "present" => Ok(ModuleState::Present),
            other => Err(Error::config(format!(
                "value of state must be one of: present, got: {}",
                other
            ))),
        }
    }
}

/// Parameters recognised by the account_info module
#[derive(Clone, Deserialize)]
pub struct ModuleParams {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_state")]
    pub state: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Retries for retryable failures (0 disables retrying)
    #[serde(default)]
    pub retries: u32,
    /// Set by Ansible when running with `--check`
    #[serde(default, rename = "_ansible_check_mode")]
    pub check_mode: bool,
}

fn default_state() -> String {
    "present".to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            token: None,
            state: default_state(),
            timeout: default_timeout(),
            base_url: None,
            retries: 0,
            check_mode: false,
        }
    }
}

impl fmt::Debug for ModuleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleParams")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("state", &self.state)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("retries", &self.retries)
            .field("check_mode", &self.check_mode)
            .finish()
    }
}

impl ModuleParams {
    /// Parse the contents of an Ansible arguments file.
    ///
    /// Accepts both the bare parameter object and the
    /// `{"ANSIBLE_MODULE_ARGS": {...}}` wrapper. `_ansible_check_mode` maps
    /// to `check_mode`; other unknown keys are ignored.
    pub fn from_args_json(content: &str) -> Result<Self> {
        let mut value: JsonValue = serde_json::from_str(content)?;
        if let Some(inner) = value.as_object_mut().and_then(|map| map.remove(ANSIBLE_ARGS_KEY)) {
            value = inner;
        }
        if !value.is_object() {
            return Err(Error::config("module arguments must be a JSON object"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse an Ansible arguments file
    pub fn from_args_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_args_json(&content)
    }

    pub fn state(&self) -> Result<ModuleState> {
        ModuleState::parse(&self.state)
    }

    /// Token from the parameters, else the first set token env var
    pub fn resolve_token(&self) -> Option<String> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    /// Same as `resolve_token` with an injectable environment lookup
    pub fn resolve_token_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                TOKEN_ENV_VARS
                    .iter()
                    .filter_map(|name| lookup(name))
                    .find(|t| !t.trim().is_empty())
            })
    }

    pub fn credential(&self) -> Result<Credential> {
        let token = self.resolve_token().ok_or_else(|| {
            Error::config(format!(
                "missing required token; set the token parameter or one of {}",
                TOKEN_ENV_VARS.join(", ")
            ))
        })?;
        Credential::new(token)
    }

    /// Client configuration derived from these parameters
    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.timeout == 0 {
            return Err(Error::config("timeout must be greater than zero"));
        }
        let base_url = self.base_url.clone().unwrap_or_else(get_base_url);
        let config = ClientConfig::new(&base_url)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retry(RetryPolicy::with_max_retries(self.retries));
        config.validate()?;
        Ok(config)
    }
}
