//! Mock DigitalOcean API server for testing
//!
//! Simulates the parts of the DigitalOcean API v2 this crate talks to:
//! - GET /v2/account returns { account: {...} }
//! - Bad or missing bearer tokens get 401 { id: "unauthorized", message: "..." }
//!
//! Every response carries `Connection: close` so the client never reuses a
//! socket the server already dropped.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use reqwest::blocking::Client;
use serde_json::{json, Value as JsonValue};

use super::http::{ReqwestTransport, USER_AGENT};

/// Token prefixes the mock accepts
const VALID_TOKEN_PREFIXES: [&str; 3] = ["dop_v1_", "sk_", "test_"];

/// Mock DigitalOcean server for testing
pub struct MockDigitalOceanServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Canned error response
#[derive(Debug, Clone)]
pub struct MockError {
    pub status: u16,
    pub status_text: &'static str,
    pub body: String,
}

/// Behaviour of the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Object served under "account"; `None` serves `{}`
    pub account: Option<JsonValue>,
    /// Exact success body, overrides `account`
    pub raw_body: Option<String>,
    /// Reject every request with 401
    pub fail_auth: bool,
    /// Reject every request with 429 and `Retry-After: 1`
    pub rate_limit: bool,
    /// Answer every request with this error
    pub error: Option<MockError>,
    /// Answer the first N requests with 503 before behaving normally
    pub fail_first: usize,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            account: Some(sample_account()),
            raw_body: None,
            fail_auth: false,
            rate_limit: false,
            error: None,
            fail_first: 0,
            delay_ms: 0,
        }
    }
}

/// Account object as documented for GET /v2/account
pub fn sample_account() -> JsonValue {
    json!({
        "droplet_limit": 25,
        "floating_ip_limit": 5,
        "volume_limit": 100,
        "email": "sammy@digitalocean.com",
        "uuid": "b6fr89dbf6d9156cace5f3c78dc9851d957381ef",
        "email_verified": true,
        "status": "active",
        "status_message": " ",
        "team": {
            "uuid": "5df3e3004a17e242b7c20ca6c9fc25b701a47ece",
            "name": "My Team"
        }
    })
}

/// Transport that ignores system proxies so loopback requests stay local
pub fn direct_transport() -> ReqwestTransport {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .no_proxy()
        .build()
        .expect("build HTTP client");
    ReqwestTransport::with_client(client)
}

impl MockDigitalOceanServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let requests = Arc::clone(&requests_clone);
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &requests);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockDigitalOceanServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, requests: &AtomicUsize) {
    // Accepted sockets may inherit non-blocking mode from the listener
    let _ = stream.set_nonblocking(false);

    let mut buffer = [0; 8192];
    let n = match stream.read(&mut buffer) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buffer[..n]);
    let seen = requests.fetch_add(1, Ordering::SeqCst);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(
            &mut stream,
            400,
            "Bad Request",
            &[],
            r#"{"id":"bad_request","message":"Invalid request"}"#,
        );
        return;
    }
    let (method, path) = (parts[0], parts[1]);

    if config.fail_auth || !has_valid_token(&request) {
        send_response(
            &mut stream,
            401,
            "Unauthorized",
            &[],
            r#"{"id":"unauthorized","message":"Unable to authenticate you"}"#,
        );
        return;
    }

    if config.rate_limit {
        send_response(
            &mut stream,
            429,
            "Too Many Requests",
            &[("Retry-After", "1")],
            r#"{"id":"too_many_requests","message":"API Rate limit exceeded."}"#,
        );
        return;
    }

    if seen < config.fail_first {
        send_response(
            &mut stream,
            503,
            "Service Unavailable",
            &[],
            r#"{"id":"service_unavailable","message":"Service temporarily unavailable"}"#,
        );
        return;
    }

    if let Some(error) = &config.error {
        send_response(&mut stream, error.status, error.status_text, &[], &error.body);
        return;
    }

    let path_without_query = path.split('?').next().unwrap_or(path);
    match (method, path_without_query) {
        ("GET", "/v2/account") => {
            let body = match (&config.raw_body, &config.account) {
                (Some(raw), _) => raw.clone(),
                (None, Some(account)) => json!({ "account": account }).to_string(),
                (None, None) => "{}".to_string(),
            };
            send_response(&mut stream, 200, "OK", &[], &body);
        }
        ("GET", _) => send_response(
            &mut stream,
            404,
            "Not Found",
            &[],
            r#"{"id":"not_found","message":"The resource you were accessing could not be found."}"#,
        ),
        _ => send_response(
            &mut stream,
            405,
            "Method Not Allowed",
            &[],
            r#"{"id":"method_not_allowed","message":"Method not allowed"}"#,
        ),
    }
}

/// Check `Authorization: Bearer <token>` (header name case-insensitive)
fn has_valid_token(request: &str) -> bool {
    request
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("authorization"))
        .and_then(|(_, value)| value.trim().strip_prefix("Bearer "))
        .map(|token| VALID_TOKEN_PREFIXES.iter().any(|p| token.starts_with(p)))
        .unwrap_or(false)
}

fn send_response(
    stream: &mut TcpStream,
    status: u16,
    status_text: &str,
    headers: &[(&str, &str)],
    body: &str,
) {
    let extra: String = headers
        .iter()
        .map(|(name, value)| format!("{}: {}\r\n", name, value))
        .collect();
    let response = format!(
        concat!(
            "HTTP/1.1 {} {}\r\n",
            "Content-Type: application/json\r\n",
            "Content-Length: {}\r\n",
            "Connection: close\r\n",
            "{}\r\n{}"
        ),
        status,
        status_text,
        body.len(),
        extra,
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockDigitalOceanServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
        assert_eq!(server.request_count(), 0);
    }

    #[test]
    fn test_token_check() {
        assert!(has_valid_token("GET / HTTP/1.1\r\nauthorization: Bearer dop_v1_abc\r\n\r\n"));
        assert!(has_valid_token("GET / HTTP/1.1\r\nAuthorization: Bearer sk_valid\r\n\r\n"));
        assert!(!has_valid_token("GET / HTTP/1.1\r\nAuthorization: Bearer nope\r\n\r\n"));
        assert!(!has_valid_token("GET / HTTP/1.1\r\nHost: x\r\n\r\n"));
    }
}
