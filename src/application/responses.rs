use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::services::device_lifecycle::LifecycleError;
use crate::domain::models::term::TermSchedule;

/// Plain-text error reply.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        counter!("lifecycle_errors_total", 1, "kind" => err.kind());
        let status = match &err {
            LifecycleError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            LifecycleError::Conflict(_) => StatusCode::CONFLICT,
            LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
            LifecycleError::Forbidden(_) => StatusCode::FORBIDDEN,
            LifecycleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "rejected request body");
        Self::bad_request("Invalid request body")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection, "rejected query string");
        Self::bad_request("serial_number parameter is required")
    }
}

#[derive(Debug, Deserialize)]
pub struct SerialNumberQuery {
    pub serial_number: Option<String>,
}

impl SerialNumberQuery {
    pub fn require(self) -> Result<String, ApiError> {
        self.serial_number
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::bad_request("serial_number parameter is required"))
    }
}

#[derive(Debug, Serialize)]
pub struct ActivationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<TermSchedule>,
}

impl ActivationResponse {
    pub fn activated(terms: Vec<TermSchedule>) -> Self {
        Self {
            success: true,
            message: "Device activated successfully".to_string(),
            terms,
        }
    }
}
