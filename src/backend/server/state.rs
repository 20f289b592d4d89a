/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The SQLite connection pool
 * - JWT signing keys and token lifetimes
 * - The loaded configuration
 *
 * Everything is cheap to clone (`SqlitePool` is reference counted, the
 * rest sits behind `Arc`), so Axum can hand a copy to every handler.
 *
 * # Example
 *
 * ```rust,no_run
 * use userauths::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _pool = &state.db;
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::sessions::JwtKeys;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Token signing keys
    pub jwt: Arc<JwtKeys>,

    /// Resolved configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            jwt: Arc::new(JwtKeys::from_config(&config)),
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the pool directly with
/// `State(pool): State<SqlitePool>`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.jwt.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
