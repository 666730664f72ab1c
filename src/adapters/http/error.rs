//! JSON error bodies shared by every endpoint.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::session::SessionError;

/// `{ "code": ..., "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Maps a handler error to its HTTP response.
///
/// Infrastructure details are logged and never sent to the client.
pub fn session_error_response(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => {
            ErrorResponse::not_found("Session", &id.to_string()).into_response_with(StatusCode::NOT_FOUND)
        }
        SessionError::ValidationFailed { field, message } => ErrorResponse::bad_request(format!(
            "Validation failed for {}: {}",
            field, message
        ))
        .into_response_with(StatusCode::BAD_REQUEST),
        SessionError::Infrastructure(detail) => {
            tracing::error!(error = %detail, "Request failed in persistence layer");
            ErrorResponse::internal().into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Malformed or non-JSON bodies are client errors, not 422s.
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    ErrorResponse::bad_request(rejection.body_text()).into_response_with(StatusCode::BAD_REQUEST)
}

pub fn invalid_id_response(what: &str) -> Response {
    ErrorResponse::bad_request(format!("Invalid {} ID", what))
        .into_response_with(StatusCode::BAD_REQUEST)
}
