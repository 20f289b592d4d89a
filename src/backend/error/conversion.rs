/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses.
 *
 * # Response Format
 *
 * Validation errors are returned as a bare field map:
 * ```json
 * { "password": ["Password fields didn't match."] }
 * ```
 *
 * Authentication and lookup errors carry a `detail` (and, for token
 * problems, a `code`):
 * ```json
 * { "detail": "Token is invalid or expired", "code": "token_not_valid" }
 * ```
 *
 * Internal errors never expose the underlying cause:
 * ```json
 * { "error": "Internal server error", "status": 500 }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            BackendError::Validation(errors) => json!(errors),
            BackendError::AuthenticationFailed
            | BackendError::InvalidToken
            | BackendError::NotAuthenticated
            | BackendError::NotFound(_) => match self.code() {
                Some(code) => json!({ "detail": self.to_string(), "code": code }),
                None => json!({ "detail": self.to_string() }),
            },
            BackendError::Database(_)
            | BackendError::Token(_)
            | BackendError::PasswordHash(_)
            | BackendError::Internal { .. } => {
                tracing::error!("Request failed: {}", self);
                json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
