//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod transport;

pub use transport::{
    endpoint_url, validate_request, HttpMethod, RawResponse, Transport, TransportError,
};
