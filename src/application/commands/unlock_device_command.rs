use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::api::rest::state::AppState;
use crate::application::responses::ApiError;

#[derive(Deserialize)]
pub struct UnlockRequest {
    pub serial_number: String,
}

pub async fn unlock_device_command(
    State(state): State<AppState>,
    body: Result<Json<UnlockRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    state.lifecycle.unlock(&body.serial_number).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Device unlocked successfully",
    })))
}
