/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * 1. API routes under `/api/v1`
 * 2. JSON 404 fallback
 * 3. CORS for the configured frontend origin
 * 4. Request tracing
 */

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    let router = router.fallback(not_found);

    let router = match cors_layer(app_state.config.frontend_base()) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." })))
}

/// CORS policy allowing the frontend origin
fn cors_layer(frontend_base: &str) -> Option<CorsLayer> {
    let origin = match HeaderValue::from_str(frontend_base) {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!("Frontend URL is not a valid origin, CORS disabled: {}", e);
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}
