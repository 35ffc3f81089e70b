//! API error types and their response mapping.
//!
//! [`ApiError`] covers the three failure classes of the request surface:
//! validation (400), not-found (404), and unanticipated faults (500). It
//! implements `axum::response::IntoResponse`, producing the failure half of
//! the uniform envelope: `{"success": false, "error": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client input failed validation. Never causes internal state change.
    #[error("{0}")]
    Validation(String),

    /// The referenced id has no live record. A normal lookup outcome, not a
    /// system fault.
    #[error("Todo with id '{0}' not found")]
    NotFound(String),

    /// Anything unanticipated reaching the top of the handler layer. Logged;
    /// only a generic message leaves the process.
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(source) => {
                error!("Unhandled error: {source:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias for handler signatures.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = ApiError::NotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "Todo with id 'abc-123' not found");
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (
                ApiError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::NotFound("x".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
