//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O. Nothing here is
//! mutable after construction.

mod account;
pub mod api_error;
mod credential;
pub mod result;

pub use account::{AccountInfo, Team};
pub use api_error::{AccountResult, ApiError, FetchError, UNKNOWN_REASON};
pub use credential::Credential;
