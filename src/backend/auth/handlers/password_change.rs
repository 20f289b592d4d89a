/**
 * Password Change Handler
 *
 * POST /api/v1/user/password-change/ completes a reset: it redeems the
 * one-time code issued by the reset endpoint and stores the new password.
 *
 * # Process
 *
 * 1. Required fields (`otp`, `uuidb64`, `password`)
 * 2. Look up the account by primary key and check the code and its age
 * 3. Password policy against the account
 * 4. Hash and store; the code and reset token are cleared
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;
use chrono::Duration;

use crate::backend::auth::handlers::types::{MessageResponse, PasswordChangeRequest, RequiredFields, FIELD_REQUIRED};
use crate::backend::auth::password::{validate_password, PasswordCandidate};
use crate::backend::auth::reset::{complete_password_change, verify_reset_code, OTP_REJECTED};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidatedJson;
use crate::backend::server::state::AppState;
use crate::shared::FieldErrors;

pub const PASSWORD_CHANGED: &str = "Password changed successfully";

/// Primary key from `uuidb64`, accepting a JSON number or a numeric string
fn parse_user_id(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Password change handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, rejected code (`otp`), or weak password (`password`)
pub async fn password_change(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PasswordChangeRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    let mut required = RequiredFields::new();
    let otp = required.take("otp", &request.otp).trim();
    let password = required.take("password", &request.password);
    if request.uuidb64.is_none() {
        required.add("uuidb64", FIELD_REQUIRED);
    }
    let errors = required.into_errors();
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let rejected = || BackendError::validation("otp", OTP_REJECTED);
    let otp_lifetime = Duration::seconds(state.config.otp_lifetime_secs);

    let user_id = request.uuidb64.as_ref().and_then(parse_user_id).ok_or_else(rejected)?;
    let user = get_user_by_id(&state.db, user_id).await?.ok_or_else(rejected)?;
    verify_reset_code(&user, otp, otp_lifetime)?;

    let candidate = PasswordCandidate {
        username: &user.username,
        first_name: &user.first_name,
        last_name: &user.last_name,
        email: &user.email,
    };
    if let Err(messages) = validate_password(password, Some(&candidate)) {
        let mut errors = FieldErrors::new();
        errors.extend("password", messages);
        return Err(errors.into());
    }

    let password_hash = hash(password, state.config.bcrypt_cost)?;
    complete_password_change(&state.db, user.id, otp, &password_hash, otp_lifetime).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: PASSWORD_CHANGED.to_string(),
        }),
    ))
}
