//! Shared error vocabulary: error code tokens, failure messages and
//! field-level validation errors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Error code tokens used across the application
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const AUTH_UNAUTHORIZED: &str = "AUTH_UNAUTHORIZED";
    pub const AUTH_FORBIDDEN: &str = "AUTH_FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const BUSINESS_RULE_VIOLATION: &str = "BUSINESS_RULE_VIOLATION";
}

/// Stable, machine-readable error identifier clients can branch on.
///
/// The well-known tokens have dedicated variants; anything else an
/// application wants to surface goes through [`ErrorCode::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BadRequest,
    AuthUnauthorized,
    AuthForbidden,
    NotFound,
    RateLimitExceeded,
    ValidationFailed,
    InternalServerError,
    Custom(String),
}

impl ErrorCode {
    /// Derive the code for a status when none was supplied explicitly.
    ///
    /// Unknown statuses always fall back to `INTERNAL_SERVER_ERROR`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::BadRequest,
            401 => ErrorCode::AuthUnauthorized,
            403 => ErrorCode::AuthForbidden,
            404 => ErrorCode::NotFound,
            429 => ErrorCode::RateLimitExceeded,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// The wire token for this code
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::BadRequest => error_codes::BAD_REQUEST,
            ErrorCode::AuthUnauthorized => error_codes::AUTH_UNAUTHORIZED,
            ErrorCode::AuthForbidden => error_codes::AUTH_FORBIDDEN,
            ErrorCode::NotFound => error_codes::NOT_FOUND,
            ErrorCode::RateLimitExceeded => error_codes::RATE_LIMIT_EXCEEDED,
            ErrorCode::ValidationFailed => error_codes::VALIDATION_FAILED,
            ErrorCode::InternalServerError => error_codes::INTERNAL_SERVER_ERROR,
            ErrorCode::Custom(code) => code.as_str(),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(token: &str) -> Self {
        match token {
            error_codes::BAD_REQUEST => ErrorCode::BadRequest,
            error_codes::AUTH_UNAUTHORIZED => ErrorCode::AuthUnauthorized,
            error_codes::AUTH_FORBIDDEN => ErrorCode::AuthForbidden,
            error_codes::NOT_FOUND => ErrorCode::NotFound,
            error_codes::RATE_LIMIT_EXCEEDED => ErrorCode::RateLimitExceeded,
            error_codes::VALIDATION_FAILED => ErrorCode::ValidationFailed,
            error_codes::INTERNAL_SERVER_ERROR => ErrorCode::InternalServerError,
            other => ErrorCode::Custom(other.to_string()),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(token: String) -> Self {
        ErrorCode::from(token.as_str())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(ErrorCode::from(token))
    }
}

/// Human-readable failure message, either plain text or structured JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FailureMessage {
    Text(String),
    Structured(serde_json::Value),
}

impl FailureMessage {
    /// Render the message as a single line for logs
    pub fn to_log_string(&self) -> String {
        match self {
            FailureMessage::Text(text) => text.clone(),
            FailureMessage::Structured(value) => value.to_string(),
        }
    }
}

impl From<&str> for FailureMessage {
    fn from(text: &str) -> Self {
        FailureMessage::Text(text.to_string())
    }
}

impl From<String> for FailureMessage {
    fn from(text: String) -> Self {
        FailureMessage::Text(text)
    }
}

impl fmt::Display for FailureMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureMessage::Text(text) => f.write_str(text),
            FailureMessage::Structured(value) => write!(f, "{}", value),
        }
    }
}

/// One invalid input field reported by request validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted/bracketed path to the offending field
    pub property: String,

    /// The rejected raw value (redacted for sensitive fields)
    #[serde(default)]
    pub value: serde_json::Value,

    /// Violated rule name -> explanation
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,

    /// Nested failures for object and array properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldError>,
}

impl FieldError {
    pub fn new(property: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            property: property.into(),
            value,
            constraints: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Record a violated rule.
    ///
    /// A rule name reported twice with a different message (two `matches`
    /// patterns, say) is kept under `<rule>_2`, `<rule>_3` and so on.
    pub fn add_constraint(&mut self, rule: impl Into<String>, message: impl Into<String>) {
        let rule = rule.into();
        let message = message.into();

        let mut key = rule.clone();
        let mut n = 1;
        while let Some(existing) = self.constraints.get(&key) {
            if *existing == message {
                return;
            }
            n += 1;
            key = format!("{}_{}", rule, n);
        }
        self.constraints.insert(key, message);
    }

    /// Builder form of [`FieldError::add_constraint`]
    pub fn with_constraint(mut self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_constraint(rule, message);
        self
    }

    pub fn with_children(mut self, children: Vec<FieldError>) -> Self {
        self.children = children;
        self
    }

    /// A field error is only worth reporting if it or a descendant failed
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.children.is_empty()
    }
}
