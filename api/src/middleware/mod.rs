pub mod cors;
pub mod exception_filter;
pub mod response_envelope;

pub use cors::create_cors;
pub use exception_filter::ExceptionFilter;
pub use response_envelope::ResponseEnvelope;

use actix_web::HttpRequest;
use ft_core::pipeline::RequestInfo;

/// Path plus query string exactly as the client sent it
pub(crate) fn request_url(req: &HttpRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}

pub(crate) fn request_info(req: &HttpRequest) -> RequestInfo {
    RequestInfo::new(req.method().as_str(), request_url(req))
}
