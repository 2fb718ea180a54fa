//! Application factory
//!
//! Builds the Actix-web application: shared state, body limits, the
//! request pipeline middleware and the `/api/v1` routes.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Condition, Logger},
    web, App, Error, HttpRequest,
};

use ft_core::pipeline::{ExceptionNormalizer, FailureLogger};
use ft_core::repositories::{CategoryRepository, TransactionRepository};
use ft_core::validation::ValidationGate;
use ft_shared::config::AppConfig;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{create_cors, ExceptionFilter, ResponseEnvelope};
use crate::routes::{categories, health, transactions, AppState};

/// Create and configure the application with all dependencies.
///
/// Middleware order, innermost first: success envelope, CORS, exception
/// filter, access log. The exception filter therefore sees every failure,
/// including CORS rejections and panics.
pub fn create_app<C, T>(
    config: &AppConfig,
    app_state: web::Data<AppState<C, T>>,
    logger: Arc<dyn FailureLogger>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    let gate = web::Data::new(ValidationGate::new(config.validation.clone()));
    let normalizer = ExceptionNormalizer::new(logger);

    App::new()
        .app_data(app_state)
        .app_data(gate)
        .app_data(web::PayloadConfig::new(config.server.max_payload_size))
        .app_data(web::PathConfig::default().error_handler(|err, _| {
            ApiError::bad_request(format!("Invalid path parameter: {}", err)).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _| {
            ApiError::bad_request(format!("Invalid query string: {}", err)).into()
        }))
        .wrap(ResponseEnvelope::new())
        .wrap(create_cors(&config.cors))
        .wrap(ExceptionFilter::new(normalizer))
        .wrap(Condition::new(config.logging.access_log, Logger::default()))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/categories")
                        .route("", web::get().to(categories::list_categories::<C, T>))
                        .route("", web::post().to(categories::create_category::<C, T>))
                        .route("/{id}", web::get().to(categories::get_category::<C, T>))
                        .route("/{id}", web::delete().to(categories::delete_category::<C, T>)),
                )
                .service(
                    web::scope("/transactions")
                        .route("", web::get().to(transactions::list_transactions::<C, T>))
                        .route("", web::post().to(transactions::create_transaction::<C, T>)),
                ),
        )
        .default_service(web::route().to(route_not_found))
}

/// Default handler for unknown routes
async fn route_not_found(req: HttpRequest) -> ApiResult<&'static str> {
    Err(ApiError::not_found(format!(
        "Cannot {} {}",
        req.method(),
        req.path()
    )))
}
