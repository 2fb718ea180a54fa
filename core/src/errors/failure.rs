//! Canonical failure representation consumed by the exception normalizer.

use std::any::Any;
use std::backtrace::BacktraceStatus;
use std::fmt;

use ft_shared::errors::{ErrorCode, FailureMessage, FieldError};
use thiserror::Error;

/// Message used for every validation failure
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Structured description of a failure that is safe to show a client
#[derive(Debug, Clone, PartialEq)]
pub struct FailureDescriptor {
    /// HTTP status
    pub status_code: u16,
    /// Explicit error code; derived from the status when absent
    pub error_code: Option<ErrorCode>,
    pub message: FailureMessage,
    /// Present only for validation failures
    pub field_errors: Option<Vec<FieldError>>,
}

impl FailureDescriptor {
    pub fn new(status_code: u16, message: impl Into<FailureMessage>) -> Self {
        Self {
            status_code,
            error_code: None,
            message: message.into(),
            field_errors: None,
        }
    }

    /// Descriptor carrying the generic message for `status_code`
    pub fn from_status(status_code: u16) -> Self {
        Self::new(status_code, default_message(status_code))
    }

    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }

    pub fn bad_request(message: impl Into<FailureMessage>) -> Self {
        Self::new(400, message)
    }

    pub fn unauthorized(message: impl Into<FailureMessage>) -> Self {
        Self::new(401, message)
    }

    pub fn forbidden(message: impl Into<FailureMessage>) -> Self {
        Self::new(403, message)
    }

    pub fn not_found(message: impl Into<FailureMessage>) -> Self {
        Self::new(404, message)
    }

    pub fn too_many_requests(message: impl Into<FailureMessage>) -> Self {
        Self::new(429, message)
    }

    /// 400 / `VALIDATION_FAILED` with one entry per invalid field
    pub fn validation_failed(field_errors: Vec<FieldError>) -> Self {
        Self::new(400, VALIDATION_FAILED_MESSAGE)
            .with_code(ErrorCode::ValidationFailed)
            .with_field_errors(field_errors)
    }

    /// Explicit code, or the status lookup table
    pub fn resolved_code(&self) -> ErrorCode {
        self.error_code
            .clone()
            .unwrap_or_else(|| ErrorCode::from_status(self.status_code))
    }

    /// Only client (4xx) and server (5xx) error statuses can be reported as-is
    pub fn is_well_formed(&self) -> bool {
        (400..=599).contains(&self.status_code)
    }
}

impl fmt::Display for FailureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status_code, self.resolved_code(), self.message)
    }
}

/// Generic client-facing message for a status
pub fn default_message(status_code: u16) -> &'static str {
    match status_code {
        400 => "Bad request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Resource not found",
        409 => "Conflict",
        422 => "Unprocessable entity",
        429 => "Too many requests",
        _ => "Internal server error",
    }
}

/// Opaque fault whose detail never leaves the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub detail: String,
    pub trace: Option<String>,
}

impl Fault {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Capture an error with its whole source chain
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut detail = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::new(detail)
    }

    /// Capture an `anyhow` error, keeping its backtrace when one was recorded
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        let fault = Self::new(format!("{:#}", error));
        let backtrace = error.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            fault.with_trace(backtrace.to_string())
        } else {
            fault
        }
    }

    /// Describe a panic payload caught while running a handler
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(message) = payload.downcast_ref::<&str>() {
            format!("handler panicked: {}", message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            format!("handler panicked: {}", message)
        } else {
            String::from("handler panicked with a non-string payload")
        };
        Self::new(detail)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Every failure the pipeline can see
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    /// Recognized failure with a client-safe description
    #[error("{0}")]
    Descriptor(FailureDescriptor),

    /// Anything else; reported to clients as a generic 500
    #[error("unrecognized fault: {0}")]
    Unrecognized(Fault),
}

impl Failure {
    pub fn unrecognized(detail: impl Into<String>) -> Self {
        Failure::Unrecognized(Fault::new(detail))
    }

    pub fn descriptor(&self) -> Option<&FailureDescriptor> {
        match self {
            Failure::Descriptor(descriptor) => Some(descriptor),
            Failure::Unrecognized(_) => None,
        }
    }
}

impl From<FailureDescriptor> for Failure {
    fn from(descriptor: FailureDescriptor) -> Self {
        Failure::Descriptor(descriptor)
    }
}

impl From<Fault> for Failure {
    fn from(fault: Fault) -> Self {
        Failure::Unrecognized(fault)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Failure::Unrecognized(Fault::from_anyhow(&error))
    }
}
