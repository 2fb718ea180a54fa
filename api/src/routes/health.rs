use actix_web::web;
use std::collections::HashMap;

use ft_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

/// Handler for GET /api/v1/health
pub async fn health_check() -> web::Json<HealthResponse> {
    let mut services = HashMap::new();
    services.insert(
        "ledger".to_string(),
        ServiceHealth {
            status: HealthStatus::Healthy,
            message: Some("in-memory store".to_string()),
        },
    );

    web::Json(HealthResponse {
        status: HealthStatus::Healthy,
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
