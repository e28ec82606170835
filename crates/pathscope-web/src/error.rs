//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error payload returned by the JSON API.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub http_status: u16,
    pub timestamp: String,
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorEntry {
    pub context: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, context: &str, message: impl Into<String>) -> Self {
        Self {
            http_status: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            errors: vec![ApiErrorEntry {
                context: context.to_string(),
                message: message.into(),
            }],
        }
    }

    pub fn internal(context: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, context, message)
    }

    pub fn not_found(context: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, context, message)
    }

    pub fn forbidden(context: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, context, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
