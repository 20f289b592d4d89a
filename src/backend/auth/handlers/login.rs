/**
 * Login Handler
 *
 * This module implements the token endpoint, POST /api/v1/user/token/.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Reject inactive accounts
 * 4. Issue an access/refresh token pair
 *
 * # Security
 *
 * - Unknown email, wrong password and inactive account all produce the
 *   same 401 (no user enumeration)
 * - An unknown email still costs one bcrypt round at the configured cost
 * - Passwords are never logged or returned
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, verify};

use crate::backend::auth::handlers::types::{LoginRequest, RequiredFields, TokenPairResponse, UserResponse};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidatedJson;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If `email` or `password` is missing or blank
/// * `401 Unauthorized` - If the credentials do not match an active account
///
/// # Example Request
///
/// ```http
/// POST /api/v1/user/token/ HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "c0rrect-h0rse" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": 1, "username": "user", "email": "user@example.com", ... }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, BackendError> {
    let mut required = RequiredFields::new();
    let email = required.take("email", &request.email).trim();
    let password = required.take("password", &request.password);
    let errors = required.into_errors();
    if !errors.is_empty() {
        return Err(errors.into());
    }

    tracing::info!("Login request for: {}", email);

    let Some(user) = get_user_by_email(&state.db, email).await? else {
        tracing::warn!("User not found: {}", email);
        hash(password, state.config.bcrypt_cost)?;
        return Err(BackendError::AuthenticationFailed);
    };

    if !verify(password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::AuthenticationFailed);
    }

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user: {}", email);
        return Err(BackendError::AuthenticationFailed);
    }

    let pair = state.jwt.create_token_pair(&user)?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
        user: UserResponse::from(&user),
    }))
}
