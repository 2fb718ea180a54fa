use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use ft_api::{config, create_app, logging::LogFailureLogger, routes::AppState};
use ft_core::pipeline::FailureLogger;
use ft_core::repositories::{InMemoryCategoryRepository, InMemoryTransactionRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = config::load()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting FinTrack API Server ({})", config.environment);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_state = web::Data::new(AppState::new(
        Arc::new(InMemoryCategoryRepository::new()),
        Arc::new(InMemoryTransactionRepository::new()),
    ));
    let failure_logger: Arc<dyn FailureLogger> =
        Arc::new(LogFailureLogger::new(config.logging.log_fault_traces));

    let workers = config.server.workers;
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        create_app(&app_config, app_state.clone(), failure_logger.clone())
    });
    let server = if workers > 0 { server.workers(workers) } else { server };

    server.bind(&bind_address)?.run().await
}
