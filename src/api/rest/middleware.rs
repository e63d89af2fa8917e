use std::any::Any;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use log::error;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
};
use tracing::info;

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    info!(method = %req.method(), path = %req.uri().path(), "request received");
    next.run(req).await
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("panic recovered while handling request: {detail}");

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Request logging, permissive CORS and panic recovery, outermost last.
pub fn apply(router: Router) -> Router {
    router
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer())
        .layer(CatchPanicLayer::custom(panic_response))
}
