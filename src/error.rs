use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::weather::OwmError;

/// Client-visible error: a status code plus a message rendered as
/// `{"message": ...}`. Handlers return this for every failure path so that
/// "not found" vs "invalid input" vs "server error" is an explicit value,
/// not control flow.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        error!("internal error: {e:#}");
        Self::internal()
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(e: bcrypt::BcryptError) -> Self {
        error!("password hashing failed: {e}");
        Self::internal()
    }
}

impl From<OwmError> for ApiError {
    fn from(e: OwmError) -> Self {
        match e {
            // Provider-request failures surface the upstream code and
            // message verbatim.
            OwmError::Api { status, message } => Self {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            },
            OwmError::Http(e) => {
                error!("weather provider failure: {e}");
                Self::internal()
            }
        }
    }
}
