//! API response envelopes and health check types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{ErrorCode, FailureMessage, FieldError};

/// Message attached to every successful response
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation successful";

/// Success envelope wrapping a handler's return value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this shape
    pub success: bool,

    /// Handler payload, passed through untouched
    pub data: T,

    pub message: String,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,

    /// Request URL the payload answers
    pub path: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response stamped with the current time
    pub fn success(data: T, path: impl Into<String>) -> Self {
        Self::success_at(data, path, Utc::now())
    }

    /// Create a successful response with an explicit timestamp
    pub fn success_at(data: T, path: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data,
            message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            timestamp,
            path: path.into(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> T {
        self.data
    }

    /// Map the data to a different type
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            success: self.success,
            data: f(self.data),
            message: self.message,
            timestamp: self.timestamp,
            path: self.path,
        }
    }
}

/// Error details carried by the failure envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: FailureMessage,

    pub status_code: u16,

    pub timestamp: DateTime<Utc>,

    pub path: String,

    pub method: String,

    /// Field-specific errors, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Failure envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `false` for this shape
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(error: ErrorBody) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Every response body is exactly one of the two envelope shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody<T> {
    Success(ApiResponse<T>),
    Failure(ErrorEnvelope),
}

impl<T> ResponseBody<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseBody::Success(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }
}

impl<T> From<ApiResponse<T>> for ResponseBody<T> {
    fn from(response: ApiResponse<T>) -> Self {
        ResponseBody::Success(response)
    }
}

impl<T> From<ErrorEnvelope> for ResponseBody<T> {
    fn from(envelope: ErrorEnvelope) -> Self {
        ResponseBody::Failure(envelope)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Individual service health checks
    pub services: HashMap<String, ServiceHealth>,

    /// Server version
    pub version: String,
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual service health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
