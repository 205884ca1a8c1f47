//! Bearer token credential

use std::fmt;

use super::result::{Error, Result};

/// Opaque bearer token used to authenticate against the control-plane API.
///
/// The token is never printed: `Debug` and `Display` both render a redacted
/// placeholder, and the type deliberately does not implement `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap a token, rejecting empty or whitespace-only values
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::config("API token cannot be empty"));
        }
        Ok(Self { token })
    }

    /// Raw token, for building the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_empty_token() {
        assert!(Credential::new("").is_err());
        assert!(Credential::new("   ").is_err());
    }

    #[test]
    fn test_token_is_trimmed() {
        let credential = Credential::new("  dop_v1_abc\n").unwrap();
        assert_eq!(credential.expose(), "dop_v1_abc");
    }

    #[test]
    fn test_token_never_formatted() {
        let credential = Credential::new("dop_v1_secret").unwrap();
        assert!(!format!("{:?}", credential).contains("secret"));
        assert!(!credential.to_string().contains("secret"));
    }
}
