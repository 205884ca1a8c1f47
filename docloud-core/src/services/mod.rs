//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod account;
pub mod logging;
pub mod normalizer;
mod result_adapter;
mod retry;

pub use account::{AccountService, ACCOUNT_FOUND_MSG, ACCOUNT_NOT_FOUND_MSG, ACCOUNT_PATH};
pub use logging::{init_logging, LogEvent, LogFormat};
pub use result_adapter::{ErrorDetail, ModuleOutput};
pub use retry::RetryPolicy;
