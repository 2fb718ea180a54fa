//! Success envelope shaping.

use chrono::{DateTime, Utc};
use ft_shared::types::ApiResponse;
use serde_json::Value;

/// Wraps successful handler output; stateless
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseShaper;

impl ResponseShaper {
    pub fn new() -> Self {
        Self
    }

    pub fn shape(&self, data: Value, path: impl Into<String>) -> ApiResponse<Value> {
        ApiResponse::success(data, path)
    }

    pub fn shape_at(
        &self,
        data: Value,
        path: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> ApiResponse<Value> {
        ApiResponse::success_at(data, path, timestamp)
    }

    /// Decode a raw handler body into the `data` value.
    ///
    /// Only JSON bodies (`application/json` or a `+json` suffix) are decoded.
    /// Any other non-empty body is carried as a string, so a text `42` stays
    /// `"42"`. An empty body becomes `null`.
    pub fn shape_body(
        &self,
        body: &[u8],
        content_type: Option<&str>,
        path: impl Into<String>,
    ) -> ApiResponse<Value> {
        self.shape(Self::body_value(body, content_type), path)
    }

    pub fn body_value(body: &[u8], content_type: Option<&str>) -> Value {
        if body.is_empty() {
            return Value::Null;
        }
        if content_type.is_some_and(is_json_media_type) {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Value::Null;
            }
            if let Ok(value) = serde_json::from_slice(body) {
                return value;
            }
        }
        Value::String(String::from_utf8_lossy(body).into_owned())
    }
}

/// `application/json`, `application/problem+json` and the like
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
