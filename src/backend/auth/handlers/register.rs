/**
 * Registration Handler
 *
 * This module implements the registration handler for POST /api/v1/user/register/.
 *
 * # Registration Process
 *
 * 1. Field checks: required fields, email format, email uniqueness
 *    (all reported together)
 * 2. `password` must equal `password2`
 * 3. Password policy against the would-be account
 * 4. Hash password using bcrypt
 * 5. Create the account and its profile in one transaction
 *
 * # Security
 *
 * - Passwords are hashed with the configured bcrypt cost
 * - Passwords are never returned in responses
 * - No tokens are issued; the client logs in separately
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;

use crate::backend::auth::accounts::{create_account, NewAccount, EMAIL_TAKEN};
use crate::backend::auth::handlers::types::{RegisterRequest, RequiredFields, UserResponse};
use crate::backend::auth::handles::{email_prefix, sanitize_username};
use crate::backend::auth::password::{validate_password, PasswordCandidate};
use crate::backend::auth::users::{email_exists, is_valid_email};
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidatedJson;
use crate::backend::server::state::AppState;
use crate::shared::FieldErrors;

pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const PASSWORD_MISMATCH: &str = "Password fields didn't match.";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Field map of every validation failure
/// * `500 Internal Server Error` - If hashing or the database fails
///
/// # Example Request
///
/// ```http
/// POST /api/v1/user/register/ HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "c0rrect-h0rse",
///   "password2": "c0rrect-h0rse",
///   "first_name": "Ada",
///   "last_name": "Lovelace"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let mut required = RequiredFields::new();
    let email = required.take("email", &request.email).trim();
    let password = required.take("password", &request.password);
    let password2 = required.take("password2", &request.password2);
    let first_name = required.take("first_name", &request.first_name).trim();
    let last_name = required.take("last_name", &request.last_name).trim();

    if !email.is_empty() {
        if !is_valid_email(email) {
            required.add("email", INVALID_EMAIL);
        } else if email_exists(&state.db, email).await? {
            tracing::warn!("Email already exists: {}", email);
            required.add("email", EMAIL_TAKEN);
        }
    }

    let errors = required.into_errors();
    if !errors.is_empty() {
        return Err(errors.into());
    }

    if password != password2 {
        return Err(BackendError::validation("password", PASSWORD_MISMATCH));
    }

    let username = sanitize_username(email_prefix(email));
    let candidate = PasswordCandidate {
        username: &username,
        first_name,
        last_name,
        email,
    };
    if let Err(messages) = validate_password(password, Some(&candidate)) {
        let mut errors = FieldErrors::new();
        errors.extend("password", messages);
        return Err(errors.into());
    }

    tracing::info!("Signup request for email: {}", email);

    let password_hash = hash(password, state.config.bcrypt_cost)?;
    let (user, _profile) = create_account(
        &state.db,
        NewAccount {
            email: email.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: None,
        },
    )
    .await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
