//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest blocking HTTP client for the Transport port
//! - In-process mock DigitalOcean API server for testing

pub mod http;

#[cfg(test)]
pub mod mock_server;
