//! Success envelope middleware.
//!
//! Buffers every successful response body and re-emits it as
//! `{success: true, data, message, timestamp, path}`. Failed responses pass
//! through untouched for the exception filter.

use actix_web::{
    body::{to_bytes, BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{self, HeaderValue},
        StatusCode,
    },
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use ft_core::pipeline::ResponseShaper;

use super::request_url;
use crate::error::ApiError;

/// Middleware factory wrapping successful responses in the success envelope
#[derive(Clone, Copy, Default)]
pub struct ResponseEnvelope {
    shaper: ResponseShaper,
}

impl ResponseEnvelope {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, B> Transform<S, ServiceRequest> for ResponseEnvelope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ResponseEnvelopeService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResponseEnvelopeService {
            service: Rc::new(service),
            shaper: self.shaper,
        }))
    }
}

pub struct ResponseEnvelopeService<S> {
    service: Rc<S>,
    shaper: ResponseShaper,
}

impl<S, B> Service<ServiceRequest> for ResponseEnvelopeService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let shaper = self.shaper;

        Box::pin(async move {
            let res = service.call(req).await?;

            if res.response().error().is_some() || !res.status().is_success() {
                return Ok(res.map_into_boxed_body());
            }

            let path = request_url(res.request());
            let content_type = res
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let (http_req, response) = res.into_parts();
            let (response, body) = response.into_parts();

            let bytes = to_bytes(body).await.map_err(|err| {
                let err: Box<dyn std::error::Error> = err.into();
                ApiError::internal(format!("failed to buffer response body: {}", err))
            })?;

            let envelope = shaper.shape_body(&bytes, content_type.as_deref(), path);
            let json = serde_json::to_vec(&envelope)
                .map_err(|err| ApiError::internal(format!("failed to encode envelope: {}", err)))?;

            let mut response = response.set_body(BoxBody::new(json));
            // The envelope always has a body
            if response.status() == StatusCode::NO_CONTENT {
                *response.status_mut() = StatusCode::OK;
            }
            let headers = response.headers_mut();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.remove(header::CONTENT_LENGTH);

            Ok(ServiceResponse::new(http_req, response))
        })
    }
}
