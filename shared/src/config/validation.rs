//! Request validation configuration

use serde::{Deserialize, Serialize};

/// Replacement for rejected values of sensitive fields
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Request body validation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Reject bodies carrying properties the schema does not declare
    #[serde(default = "default_forbid_unknown_fields")]
    pub forbid_unknown_fields: bool,

    /// Coerce numeric/boolean strings into the declared field type
    #[serde(default = "default_implicit_conversion")]
    pub implicit_conversion: bool,

    /// Field names whose rejected values are never echoed back
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            forbid_unknown_fields: default_forbid_unknown_fields(),
            implicit_conversion: default_implicit_conversion(),
            sensitive_fields: default_sensitive_fields(),
        }
    }
}

impl ValidationConfig {
    /// Case-insensitive check against the sensitive field list
    pub fn is_sensitive(&self, field: &str) -> bool {
        self.sensitive_fields
            .iter()
            .any(|name| name.eq_ignore_ascii_case(field))
    }
}

fn default_forbid_unknown_fields() -> bool {
    true
}

fn default_implicit_conversion() -> bool {
    true
}

fn default_sensitive_fields() -> Vec<String> {
    ["password", "passwordConfirmation", "currentPassword", "secret", "token", "pin"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
