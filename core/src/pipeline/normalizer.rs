//! Exception normalizer.
//!
//! Total mapping from a [`Failure`] to the error envelope. Recognized
//! descriptors keep their status, code, message and field errors; anything
//! else is reported to the client as a generic 500 while the real detail is
//! logged server-side.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ft_shared::errors::{ErrorCode, FailureMessage};
use ft_shared::types::{ErrorBody, ErrorEnvelope};

use super::logging::{FailureLogger, LogContext, LogLevel};
use crate::errors::Failure;

/// Client-facing message for every unrecognized or malformed failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Logged in place of a trace when the fault did not record one
pub const NO_TRACE_PLACEHOLDER: &str = "No stack trace available";

/// Request attributes echoed in the envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: String,
    /// Path and query string as received
    pub url: String,
}

impl RequestInfo {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

/// Rendered failure: the HTTP status plus the body to send
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFailure {
    pub status_code: u16,
    pub envelope: ErrorEnvelope,
}

impl NormalizedFailure {
    pub fn code(&self) -> &ErrorCode {
        &self.envelope.error.code
    }
}

/// Render a failure without logging it
pub fn render(failure: &Failure, request: &RequestInfo, timestamp: DateTime<Utc>) -> NormalizedFailure {
    let (status_code, code, message, errors) = match failure {
        Failure::Descriptor(descriptor) if descriptor.is_well_formed() => (
            descriptor.status_code,
            descriptor.resolved_code(),
            descriptor.message.clone(),
            descriptor.field_errors.clone(),
        ),
        _ => (
            500,
            ErrorCode::InternalServerError,
            FailureMessage::from(INTERNAL_ERROR_MESSAGE),
            None,
        ),
    };

    let body = ErrorBody {
        code,
        message,
        status_code,
        timestamp,
        path: request.url.clone(),
        method: request.method.clone(),
        errors,
    };

    NormalizedFailure {
        status_code,
        envelope: ErrorEnvelope::new(body),
    }
}

/// Renders failures and logs each one exactly once
#[derive(Clone)]
pub struct ExceptionNormalizer {
    logger: Arc<dyn FailureLogger>,
}

impl ExceptionNormalizer {
    pub fn new(logger: Arc<dyn FailureLogger>) -> Self {
        Self { logger }
    }

    pub fn normalize(&self, failure: &Failure, request: &RequestInfo) -> NormalizedFailure {
        self.normalize_at(failure, request, Utc::now())
    }

    /// Normalize with a fixed timestamp
    pub fn normalize_at(
        &self,
        failure: &Failure,
        request: &RequestInfo,
        timestamp: DateTime<Utc>,
    ) -> NormalizedFailure {
        let normalized = render(failure, request, timestamp);
        self.log(failure, request, &normalized);
        normalized
    }

    fn log(&self, failure: &Failure, request: &RequestInfo, normalized: &NormalizedFailure) {
        let mut context = LogContext {
            status_code: normalized.status_code,
            code: normalized.code().clone(),
            method: request.method.clone(),
            url: request.url.clone(),
            trace: None,
        };

        let (level, message) = match failure {
            Failure::Descriptor(descriptor) if descriptor.is_well_formed() => (
                LogLevel::for_failure(normalized.status_code, &context.code),
                descriptor.message.to_log_string(),
            ),
            Failure::Descriptor(descriptor) => {
                context.trace = Some(NO_TRACE_PLACEHOLDER.to_string());
                (
                    LogLevel::Error,
                    format!(
                        "malformed failure descriptor with status {}: {}",
                        descriptor.status_code,
                        descriptor.message.to_log_string()
                    ),
                )
            }
            Failure::Unrecognized(fault) => {
                context.trace = Some(
                    fault
                        .trace
                        .clone()
                        .unwrap_or_else(|| NO_TRACE_PLACEHOLDER.to_string()),
                );
                (LogLevel::Error, fault.detail.clone())
            }
        };

        self.logger.log(level, &message, &context);
    }
}

impl std::fmt::Debug for ExceptionNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionNormalizer").finish_non_exhaustive()
    }
}
