use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::api::rest::state::AppState;
use crate::application::responses::ApiError;
use crate::application::services::device_lifecycle::RegisterDevice;

#[derive(Deserialize)]
pub struct RegisterDeviceRequest {
    pub serial_number: String,
    pub customer_name: String,
    pub phone_number: String,
    pub emi_term: u32,
    pub emi_start_date: String,
    pub term_duration: u32,
}

impl From<RegisterDeviceRequest> for RegisterDevice {
    fn from(body: RegisterDeviceRequest) -> Self {
        Self {
            serial_number: body.serial_number,
            customer_name: body.customer_name,
            phone_number: body.phone_number,
            emi_term: body.emi_term,
            emi_start_date: body.emi_start_date,
            term_duration: body.term_duration,
        }
    }
}

pub async fn register_device_command(
    State(state): State<AppState>,
    body: Result<Json<RegisterDeviceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    let registration = state.lifecycle.register(body.into()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Device registered successfully",
        "device_id": registration.device_id,
        "terms": registration.terms,
    })))
}
