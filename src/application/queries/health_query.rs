use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn health_query() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
