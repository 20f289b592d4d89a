/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and use cases and can be
 * converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Validation Errors (400)
 *
 * Malformed, missing or mismatched input, and references to accounts
 * that do not exist (unknown reset email, wrong OTP). Reported as a
 * field-scoped map of messages.
 *
 * ## Authentication Errors (401)
 *
 * - Bad credentials or inactive account at login
 * - Invalid, expired or wrong-type JWT
 * - Missing `Authorization` header on protected routes
 *
 * ## Internal Errors (500)
 *
 * Database, hashing and token-encoding failures. These are logged and
 * reported without details.
 */

use thiserror::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use crate::backend::auth::sessions::TokenError;
use crate::shared::{FieldErrors, NON_FIELD_ERRORS};

/// Prefix axum puts in front of serde's message for wrongly typed bodies
const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use userauths::backend::error::BackendError;
///
/// let err = BackendError::validation("email", "Enter a valid email address.");
/// assert_eq!(err.status_code().as_u16(), 400);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Field-scoped validation failure
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Login with unknown email, wrong password or inactive account
    #[error("No active account found with the given credentials")]
    AuthenticationFailed,

    /// JWT failed signature, expiry or type checks
    #[error("Token is invalid or expired")]
    InvalidToken,

    /// Protected route called without a bearer token
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    /// Resource lookup by id failed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token encoding error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Anything else that is the server's fault
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `AuthenticationFailed`, `InvalidToken`, `NotAuthenticated` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationFailed | Self::InvalidToken | Self::NotAuthenticated => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Token(_) | Self::PasswordHash(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable code for 401 responses
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::InvalidToken => Some("token_not_valid"),
            Self::NotAuthenticated => Some("not_authenticated"),
            _ => None,
        }
    }

    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for BackendError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        tracing::debug!("Token rejected: {}", err);
        Self::InvalidToken
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let detail = text.strip_prefix(JSON_DATA_PREFIX).unwrap_or(&text);
                let (field, message) = split_field_path(detail);
                Self::validation(field, message)
            }
            JsonRejection::JsonSyntaxError(_) => Self::validation(NON_FIELD_ERRORS, "JSON parse error."),
            JsonRejection::MissingJsonContentType(_) => Self::validation(
                NON_FIELD_ERRORS,
                "Expected a request with `Content-Type: application/json`.",
            ),
            other => Self::validation(NON_FIELD_ERRORS, other.body_text()),
        }
    }
}

/// Split serde's `path: message` into the top-level field and the message
///
/// Errors without a path (e.g. a JSON array where an object belongs) are
/// filed under `NON_FIELD_ERRORS`.
fn split_field_path(detail: &str) -> (&str, String) {
    let message = |m: &str| format!("Invalid value: {}.", m.trim_end_matches('.'));
    match detail.split_once(": ") {
        Some((path, rest)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            let field = path.split(['.', '[']).next().unwrap_or(path);
            (field, message(rest))
        }
        _ => (NON_FIELD_ERRORS, message(detail)),
    }
}
