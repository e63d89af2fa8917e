use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use serde::Deserialize;

use crate::api::rest::state::AppState;
use crate::application::responses::{ActivationResponse, ApiError};

#[derive(Deserialize)]
pub struct ActivateRequest {
    pub activation_code: String,
}

pub async fn activate_device_command(
    State(state): State<AppState>,
    body: Result<Json<ActivateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    let terms = state.lifecycle.activate(&body.activation_code).await?;

    Ok(Json(ActivationResponse::activated(terms)))
}
