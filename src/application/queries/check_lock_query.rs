use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::rest::state::AppState;
use crate::application::responses::{ApiError, SerialNumberQuery};

pub async fn check_lock_query(
    State(state): State<AppState>,
    query: Result<Query<SerialNumberQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let serial_number = query.require()?;

    let is_locked = state.lifecycle.check_lock(&serial_number).await?;

    Ok(Json(json!({ "is_locked": is_locked })))
}
