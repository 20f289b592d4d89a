/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the access token from the
 * `Authorization: Bearer <token>` header and attaches the caller's
 * identity to the request.
 *
 * # Failure Modes (all 401)
 *
 * - No `Authorization` header: `not_authenticated`
 * - Malformed header, bad signature, expired token, refresh token used
 *   as access token, unknown or inactive account: `token_not_valid`
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::TokenType;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub username: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it as an access token
/// 3. Confirms the account still exists and is active
/// 4. Attaches `AuthenticatedUser` to the request extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(BackendError::NotAuthenticated)?
        .to_str()
        .map_err(|_| {
            tracing::warn!("Non-ASCII Authorization header");
            BackendError::InvalidToken
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::InvalidToken
    })?;

    let claims = app_state.jwt.verify_token(token.trim(), TokenType::Access)?;

    let user = get_user_by_id(&app_state.db, claims.user_id).await?;
    let user = match user {
        Some(user) if user.is_active => user,
        _ => {
            tracing::warn!("Token for missing or inactive user {}", claims.user_id);
            return Err(BackendError::InvalidToken);
        }
    };

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// Only meaningful on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::NotAuthenticated
            })?;

        Ok(AuthUser(user))
    }
}
