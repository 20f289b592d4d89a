/**
 * Server Initialization
 *
 * This module wires configuration, database and routes into a ready-to-serve
 * Axum application.
 *
 * # Initialization Process
 *
 * 1. Open the database pool from `AppConfig::database_url`
 * 2. Run migrations
 * 3. Build `AppState` (pool, JWT keys, config)
 * 4. Create the router
 */

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, run_migrations};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Startup failure
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect, migrate, and assemble the application state
pub async fn build_state(config: AppConfig) -> Result<AppState, InitError> {
    tracing::info!("Initializing userauths backend");

    let pool = connect_database(&config.database_url).await?;
    run_migrations(&pool).await?;

    Ok(AppState::new(pool, config))
}

/// Create and configure the Axum application
///
/// # Example
///
/// ```rust,no_run
/// use userauths::backend::server::init::{build_state, create_app};
/// use userauths::shared::AppConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = build_state(AppConfig::load()?).await?;
/// let app = create_app(state);
/// # Ok(())
/// # }
/// ```
pub fn create_app(state: AppState) -> Router<()> {
    let app = create_router(state);
    tracing::info!("Router configured");
    app
}
