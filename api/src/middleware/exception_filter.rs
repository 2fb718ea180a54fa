//! Exception filter middleware.
//!
//! Sits outside every route and is the only place failures become error
//! envelopes:
//! - responses carrying an error (handler `Err`, extractor rejections,
//!   unknown routes) are normalized from that error
//! - bare error-status responses without an error are normalized from
//!   their status
//! - panics raised while the request is processed become unrecognized faults

use actix_web::{
    body::BoxBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use ft_core::errors::{Failure, FailureDescriptor, Fault};
use ft_core::pipeline::{ExceptionNormalizer, NormalizedFailure};

use super::request_info;
use crate::error::ApiError;

/// Middleware factory normalizing every failure into the error envelope
#[derive(Clone)]
pub struct ExceptionFilter {
    normalizer: ExceptionNormalizer,
}

impl ExceptionFilter {
    pub fn new(normalizer: ExceptionNormalizer) -> Self {
        Self { normalizer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExceptionFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ExceptionFilterService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ExceptionFilterService {
            service: Rc::new(service),
            normalizer: self.normalizer.clone(),
        }))
    }
}

pub struct ExceptionFilterService<S> {
    service: Rc<S>,
    normalizer: ExceptionNormalizer,
}

impl<S, B> Service<ServiceRequest> for ExceptionFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let normalizer = self.normalizer.clone();
        let http_req = req.request().clone();

        Box::pin(async move {
            let outcome = AssertUnwindSafe(service.call(req)).catch_unwind().await;

            let failure = match outcome {
                Ok(Ok(res)) => match failure_of(&res) {
                    Some(failure) => failure,
                    None => return Ok(res.map_into_boxed_body()),
                },
                Ok(Err(err)) => classify(&err),
                Err(payload) => Failure::Unrecognized(Fault::from_panic(payload)),
            };

            let normalized = normalizer.normalize(&failure, &request_info(&http_req));
            Ok(envelope_response(http_req, normalized))
        })
    }
}

/// Failure carried by a response, if any
fn failure_of<B>(res: &ServiceResponse<B>) -> Option<Failure> {
    if let Some(err) = res.response().error() {
        return Some(classify(err));
    }

    let status = res.status();
    if status.is_client_error() || status.is_server_error() {
        return Some(bare_status_failure(status));
    }
    None
}

/// Map an actix error onto the failure model
pub fn classify(err: &Error) -> Failure {
    if let Some(api_error) = err.as_error::<ApiError>() {
        return api_error.failure().clone();
    }

    let status = err.as_response_error().status_code();
    if status.is_client_error() {
        FailureDescriptor::new(status.as_u16(), err.to_string()).into()
    } else {
        Failure::Unrecognized(Fault::new(format!("{} ({})", err, status)))
    }
}

fn bare_status_failure(status: StatusCode) -> Failure {
    let descriptor = FailureDescriptor::from_status(status.as_u16());
    match status {
        StatusCode::METHOD_NOT_ALLOWED => descriptor.with_code("METHOD_NOT_ALLOWED").into(),
        _ if status.is_server_error() => Failure::unrecognized(format!(
            "handler returned status {} without an error",
            status
        )),
        _ => descriptor.into(),
    }
}

fn envelope_response(req: HttpRequest, normalized: NormalizedFailure) -> ServiceResponse<BoxBody> {
    let status = StatusCode::from_u16(normalized.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let response = HttpResponse::build(status).json(normalized.envelope);
    ServiceResponse::new(req, response)
}
