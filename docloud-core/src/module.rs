//! account_info module runner
//!
//! Construction validates everything and performs no I/O; `run` makes the
//! single API call. Runtime dependencies are injected as `Capabilities`,
//! detected once at process start.

use std::sync::Arc;

use crate::adapters::http::ReqwestTransport;
use crate::client::ApiClient;
use crate::config::{ModuleParams, ModuleState};
use crate::domain::result::{Error, Result};
use crate::ports::Transport;
use crate::services::{AccountService, ModuleOutput};

/// Library name reported when the HTTP transport is unavailable
pub const HTTP_LIBRARY: &str = "reqwest";

/// Runtime capabilities the module depends on
#[derive(Clone)]
pub struct Capabilities {
    transport: Option<Arc<dyn Transport>>,
    missing: Vec<String>,
    load_error: Option<String>,
}

impl Capabilities {
    /// Build the production transport.
    ///
    /// Failure to construct it is recorded, not raised: the module reports
    /// it as a missing library when constructed.
    pub fn detect() -> Self {
        match ReqwestTransport::new() {
            Ok(transport) => Self::with_transport(Arc::new(transport)),
            Err(e) => {
                tracing::warn!(error = %e, "HTTP transport unavailable");
                Self {
                    load_error: Some(format!("{:#}", e)),
                    ..Self::missing(HTTP_LIBRARY)
                }
            }
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            missing: Vec::new(),
            load_error: None,
        }
    }

    /// Capabilities with the named library absent
    pub fn missing(library: impl Into<String>) -> Self {
        Self {
            transport: None,
            missing: vec![library.into()],
            load_error: None,
        }
    }

    /// Why the transport could not be built, when detection failed
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn transport(&self) -> Result<Arc<dyn Transport>> {
        self.transport
            .clone()
            .ok_or_else(|| Error::missing_library(self.missing.join(", ")))
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("transport", &self.transport.as_ref().map(|t| t.name().to_string()))
            .field("missing", &self.missing)
            .field("load_error", &self.load_error)
            .finish()
    }
}

/// Show information about the current user account
#[derive(Debug)]
pub struct AccountInfoModule {
    service: AccountService,
    state: ModuleState,
    check_mode: bool,
}

impl AccountInfoModule {
    /// Validate parameters and wire the client. No network access.
    ///
    /// Checks run in order: capabilities, state, credential, client config.
    pub fn new(params: &ModuleParams, capabilities: &Capabilities) -> Result<Self> {
        let transport = capabilities.transport()?;
        let state = params.state()?;
        let credential = params.credential()?;
        let config = params.client_config()?;

        let client = ApiClient::new(credential, config, transport)?;
        Ok(Self {
            service: AccountService::new(Arc::new(client)),
            state,
            check_mode: params.check_mode,
        })
    }

    /// Perform the request and shape the result.
    ///
    /// The fetch is read-only, so check mode runs it unchanged.
    pub fn run(&self) -> ModuleOutput {
        if self.check_mode {
            tracing::debug!("check mode: running read-only account fetch");
        }
        match self.state {
            ModuleState::Present => ModuleOutput::from(self.service.fetch_account()),
        }
    }

    /// Construct and run, reporting construction errors as module failures
    pub fn execute(params: &ModuleParams, capabilities: &Capabilities) -> ModuleOutput {
        match Self::new(params, capabilities) {
            Ok(module) => module.run(),
            Err(e) => {
                tracing::warn!(error = %e, "account_info module rejected its parameters");
                let output = ModuleOutput::config_failure(&e);
                match (&e, capabilities.load_error()) {
                    (Error::MissingLibrary(_), Some(cause)) => output.with_exception(cause),
                    _ => output,
                }
            }
        }
    }
}
