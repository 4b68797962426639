//! API error types and response handling

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::contact::transport::ErrorResponse;

/// Errors returned by the contact API
///
/// Every variant renders as `{"message": ...}` so the client can show it
/// verbatim.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("API error: {} - {}", StatusCode::BAD_REQUEST, msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("API error: {} - {}", StatusCode::INTERNAL_SERVER_ERROR, msg);
                // Storage details stay in the log
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
