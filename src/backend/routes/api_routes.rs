/**
 * API Route Handlers
 *
 * This module defines the routes mounted under `/api/v1`.
 *
 * # Routes
 *
 * ## Public
 * - `POST /user/token/` - Login (token pair)
 * - `POST /user/token/refresh/` - Access token refresh
 * - `POST /user/register/` - Registration
 * - `GET /user/password-reset/{email}/` - Reset code issuance
 * - `POST /user/password-change/` - Reset code redemption
 *
 * ## Authenticated
 * - `GET /user/profile/` - Caller's profile
 * - `PATCH /user/profile/` - Update names and bio
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{
    get_profile, login, password_change, password_reset, refresh_token, register, update_profile,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Mount point of the API
pub const API_PREFIX: &str = "/api/v1";

/// Configure API routes
///
/// Profile routes are wrapped in `auth_middleware`; every other route is
/// public.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/token/", post(login))
        .route("/user/token/refresh/", post(refresh_token))
        .route("/user/register/", post(register))
        .route("/user/password-reset/{email}/", get(password_reset))
        .route("/user/password-change/", post(password_change));

    let protected = Router::new()
        .route("/user/profile/", get(get_profile).patch(update_profile))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.nest(API_PREFIX, public.merge(protected))
}
