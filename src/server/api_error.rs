//! Mapping of plant store failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::plant_store::{PlantStoreError, ValidationError};

#[derive(Debug)]
pub enum ApiError {
    Store(PlantStoreError),
    BadRequest(String),
    Internal,
}

impl From<PlantStoreError> for ApiError {
    fn from(err: PlantStoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Store(err.into())
    }
}

fn status_for(err: &PlantStoreError) -> StatusCode {
    if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Store(err) => {
                let status = status_for(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("Plant store failure: {}", err);
                    return error_body(status, "Internal server error");
                }
                if status == StatusCode::CONFLICT {
                    warn!("Rejected conflicting write: {}", err);
                }
                error_body(status, err.to_string())
            }
            ApiError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::Internal => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
