/**
 * Password Reset Handler
 *
 * GET /api/v1/user/password-reset/{email}/ issues a one-time code and a
 * reset token for the account and returns the frontend link carrying
 * them. The link is returned in the body; no email is sent.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::handlers::types::PasswordResetResponse;
use crate::backend::auth::reset::begin_password_reset;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const UNKNOWN_EMAIL: &str = "User with this email does not exist.";

/// Password reset initiation handler
///
/// # Errors
///
/// * `400 Bad Request` - `{"email": ["User with this email does not exist."]}`
///
/// # Example Response
///
/// ```json
/// {
///   "email": "user@example.com",
///   "username": "user",
///   "reset_link": "http://localhost:5173/create-new-password/?otp=042917&uuidb64=1&refresh_token=eyJ..."
/// }
/// ```
pub async fn password_reset(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<PasswordResetResponse>, BackendError> {
    let ticket = begin_password_reset(&state.db, &state.jwt, state.config.frontend_base(), &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Password reset requested for unknown email: {}", email);
            BackendError::validation("email", UNKNOWN_EMAIL)
        })?;

    Ok(Json(PasswordResetResponse {
        email: ticket.user.email,
        username: ticket.user.username,
        reset_link: ticket.reset_link,
    }))
}
