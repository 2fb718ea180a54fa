//! Error type returned by every handler and extractor.
//!
//! `ApiError` only carries a [`Failure`]; the exception filter middleware
//! turns it into the error envelope and logs it. The response rendered by
//! [`ResponseError::error_response`] is the same envelope without request
//! details and is replaced by the filter.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::Utc;
use thiserror::Error;

use ft_core::errors::{DomainError, Failure, FailureDescriptor, Fault};
use ft_core::pipeline::{render, RequestInfo};

#[derive(Debug, Clone, Error)]
#[error("{failure}")]
pub struct ApiError {
    failure: Failure,
}

impl ApiError {
    pub fn new(failure: impl Into<Failure>) -> Self {
        Self {
            failure: failure.into(),
        }
    }

    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    pub fn into_failure(self) -> Failure {
        self.failure
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(FailureDescriptor::bad_request(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureDescriptor::not_found(message.into()))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(Fault::new(detail))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let rendered = render(&self.failure, &RequestInfo::new("", ""), Utc::now());
        StatusCode::from_u16(rendered.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let rendered = render(&self.failure, &RequestInfo::new("", ""), Utc::now());
        HttpResponse::build(self.status_code()).json(rendered.envelope)
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self::new(failure)
    }
}

impl From<FailureDescriptor> for ApiError {
    fn from(descriptor: FailureDescriptor) -> Self {
        Self::new(descriptor)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::new(error)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(error)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
