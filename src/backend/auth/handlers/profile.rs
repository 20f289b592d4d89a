/**
 * Profile Handlers
 *
 * GET and PATCH /api/v1/user/profile/ for the authenticated caller. Both
 * routes sit behind `auth_middleware`, which supplies `AuthUser`.
 *
 * Name changes are applied through `update_account`, so the profile's
 * cached full name follows the account.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::accounts::{update_account, AccountUpdate};
use crate::backend::auth::handlers::types::{ProfileResponse, ProfileUpdateRequest, ABOUT_MAX_LENGTH};
use crate::backend::auth::profiles::get_profile_by_user_id;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidatedJson;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::FieldErrors;

/// Get the caller's profile
///
/// A missing profile is recreated from the account.
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<ProfileResponse>, BackendError> {
    if let Some(profile) = get_profile_by_user_id(&state.db, auth.user_id).await? {
        return Ok(Json(profile.into()));
    }

    let user = get_user_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::NotFound(format!("user {}", auth.user_id)))?;
    tracing::warn!("Profile missing for user {}, recreating", user.id);
    let (_, profile) = update_account(&state.db, user.id, AccountUpdate::default()).await?;

    Ok(Json(profile.into()))
}

/// Update the caller's names and/or bio
///
/// # Errors
///
/// * `400 Bad Request` - If `about` exceeds 500 characters
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let mut errors = FieldErrors::new();
    if let Some(about) = &request.about {
        if about.chars().count() > ABOUT_MAX_LENGTH {
            errors.add(
                "about",
                format!("Ensure this field has no more than {} characters.", ABOUT_MAX_LENGTH),
            );
        }
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let update = AccountUpdate {
        first_name: request.first_name.map(|s| s.trim().to_string()),
        last_name: request.last_name.map(|s| s.trim().to_string()),
        about: request.about,
    };
    let (user, profile) = update_account(&state.db, auth.user_id, update).await?;

    tracing::info!("Profile updated for user {}", user.id);
    Ok(Json(profile.into()))
}
