//! Account domain model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Information about the authenticated DigitalOcean account.
///
/// The provider object is kept verbatim so every field round-trips exactly
/// (including ones this crate does not know about). Typed accessors cover the
/// documented fields:
///
/// ```json
/// {
///   "droplet_limit": 25, "floating_ip_limit": 5, "volume_limit": 100,
///   "email": "sammy@digitalocean.com", "uuid": "b6fr89dbf6d9156cace5f3c78dc9851d957381ef",
///   "email_verified": true, "status": "active", "status_message": " ",
///   "team": { "uuid": "5df3e3004a17e242b7c20ca6c9fc25b701a47ece", "name": "My Team" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountInfo {
    fields: Map<String, JsonValue>,
}

/// Team the account currently belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub uuid: String,
    pub name: String,
}

impl AccountInfo {
    pub fn from_map(fields: Map<String, JsonValue>) -> Self {
        Self { fields }
    }

    /// All fields as returned by the API
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.str_field("uuid")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn email_verified(&self) -> Option<bool> {
        self.fields.get("email_verified").and_then(JsonValue::as_bool)
    }

    /// Account status: "active", "warning" or "locked"
    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn status_message(&self) -> Option<&str> {
        self.str_field("status_message")
    }

    pub fn droplet_limit(&self) -> Option<i64> {
        self.fields.get("droplet_limit").and_then(JsonValue::as_i64)
    }

    pub fn floating_ip_limit(&self) -> Option<i64> {
        self.fields.get("floating_ip_limit").and_then(JsonValue::as_i64)
    }

    pub fn volume_limit(&self) -> Option<i64> {
        self.fields.get("volume_limit").and_then(JsonValue::as_i64)
    }

    /// Team info, if present and well-formed
    pub fn team(&self) -> Option<Team> {
        self.fields
            .get("team")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(JsonValue::as_str)
    }
}
