use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::api::rest::state::AppState;
use crate::application::responses::ApiError;

#[derive(Deserialize)]
pub struct RemoteLockRequest {
    pub serial_number: String,
    pub is_locked: bool,
}

pub async fn set_remote_lock_command(
    State(state): State<AppState>,
    body: Result<Json<RemoteLockRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    let is_locked = state
        .lifecycle
        .set_remote_lock(&body.serial_number, body.is_locked)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Remote lock set to {is_locked}"),
        "is_locked": is_locked,
    })))
}
