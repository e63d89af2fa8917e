use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};

use crate::api::rest::state::AppState;
use crate::application::responses::{ActivationResponse, ApiError, SerialNumberQuery};

// Doubles as the implicit activation trigger when a TV first checks in.
pub async fn check_activation_query(
    State(state): State<AppState>,
    query: Result<Query<SerialNumberQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let serial_number = query.require()?;

    let terms = state.lifecycle.check(&serial_number).await?;

    Ok(Json(ActivationResponse::activated(terms)))
}
