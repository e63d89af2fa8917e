pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use api::rest::{router::create_router, state::AppState};
use infrastructure::config::AppConfig;
use infrastructure::data::{db_context::surrealdb_context::init_db, surreal_store::SurrealDeviceStore};
use infrastructure::telemetry::{init_telemetry, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();
    init_telemetry();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = match init_db(&config.database).await {
        Ok(db) => db,
        Err(err) => {
            error!(error = %err, url = %config.database.url, "database initialization failed");
            std::process::exit(1);
        }
    };

    let store = Arc::new(SurrealDeviceStore::new(db));
    let app = create_router(AppState::new(store));

    let listener = match tokio::net::TcpListener::bind(config.bind_address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, address = %config.bind_address, "failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(address = %config.bind_address, "server listening");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "server terminated with error");
        std::process::exit(1);
    }

    info!("server stopped");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
