//! Domain-specific error types and the failure model fed to the pipeline.

mod failure;

pub use failure::{default_message, Failure, FailureDescriptor, Fault, VALIDATION_FAILED_MESSAGE};

use ft_shared::errors::error_codes;
use thiserror::Error;

/// Errors raised by the business layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Access forbidden")]
    Forbidden,

    #[error("Too many requests")]
    RateLimited,

    #[error("{message}")]
    Conflict { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<DomainError> for Failure {
    fn from(error: DomainError) -> Self {
        let message = error.to_string();
        match error {
            DomainError::NotFound { .. } => FailureDescriptor::not_found(message).into(),
            DomainError::Unauthorized => FailureDescriptor::unauthorized(message).into(),
            DomainError::Forbidden => FailureDescriptor::forbidden(message).into(),
            DomainError::RateLimited => FailureDescriptor::too_many_requests(message).into(),
            DomainError::Conflict { .. } => FailureDescriptor::new(409, message)
                .with_code(error_codes::CONFLICT)
                .into(),
            DomainError::BusinessRule { .. } => FailureDescriptor::new(422, message)
                .with_code(error_codes::BUSINESS_RULE_VIOLATION)
                .into(),
            // Internal detail must not reach the client
            DomainError::Internal { message } => Failure::Unrecognized(Fault::new(message)),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
