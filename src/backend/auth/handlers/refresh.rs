/**
 * Token Refresh Handler
 *
 * POST /api/v1/user/token/refresh/ exchanges a valid refresh token for a
 * new access token carrying the same identity claims.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AccessTokenResponse, RefreshRequest, RequiredFields};
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidatedJson;
use crate::backend::server::state::AppState;

/// Refresh handler
///
/// # Errors
///
/// * `400 Bad Request` - If `refresh` is missing or blank
/// * `401 Unauthorized` - If the token is invalid, expired, or an access token
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, BackendError> {
    let mut required = RequiredFields::new();
    let refresh = required.take("refresh", &request.refresh);
    let errors = required.into_errors();
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let access = state.jwt.refresh_access_token(refresh)?;
    tracing::debug!("Access token refreshed");

    Ok(Json(AccessTokenResponse { access }))
}
