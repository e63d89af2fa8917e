use axum::{
    Router,
    routing::{get, post},
};

use crate::api::rest::{middleware, state::AppState};
use crate::application::commands::{
    activate_device_command::activate_device_command,
    register_device_command::register_device_command,
    set_remote_lock_command::set_remote_lock_command,
    unlock_device_command::unlock_device_command,
};
use crate::application::queries::{
    check_activation_query::check_activation_query, check_lock_query::check_lock_query,
    health_query::health_query,
};
use crate::infrastructure::telemetry::metrics_handler;

pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health_query))
        .route("/register", post(register_device_command))
        .route("/activate", post(activate_device_command))
        .route("/check", get(check_activation_query))
        .route("/remote-lock", post(set_remote_lock_command))
        .route("/check-lock", get(check_lock_query))
        .route("/unlock", post(unlock_device_command));

    let app = Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    middleware::apply(app)
}
