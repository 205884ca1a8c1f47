//! DOCloud Core - typed client for the DigitalOcean control-plane API
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (AccountInfo, ApiError, Credential)
//! - **ports**: Trait definitions for external dependencies (Transport)
//! - **services**: Resource clients, error normalization, result shaping
//! - **adapters**: Concrete implementations (reqwest over HTTPS)
//!
//! `module` wires them into the `account_info` Ansible module.

pub mod adapters;
pub mod client;
pub mod config;
pub mod domain;
pub mod module;
pub mod ports;
pub mod services;

// Re-export commonly used types at crate root
pub use client::ApiClient;
pub use config::{ClientConfig, ModuleParams};
pub use domain::result::{Error, Result};
pub use domain::{AccountInfo, AccountResult, ApiError, Credential, FetchError, Team};
pub use module::{AccountInfoModule, Capabilities};
pub use ports::{Transport, TransportError};
pub use services::{AccountService, ErrorDetail, ModuleOutput, RetryPolicy};
