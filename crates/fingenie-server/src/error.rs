use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use fingenie_core::FinGenieError;

/// Request failures, all reported to the client as 400 `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Calculation(#[from] FinGenieError),

    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match &self {
            ApiError::Calculation(e) => {
                tracing::warn!(field = e.field(), error = %message, "Calculation rejected")
            }
            ApiError::Body(_) => tracing::warn!(error = %message, "Malformed request body"),
        }
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }
}
