/**
 * Database Setup
 *
 * This module opens the SQLite connection pool and runs the embedded
 * migrations from `migrations/`.
 *
 * Foreign keys are switched on for every connection; profile deletion
 * relies on `ON DELETE CASCADE`.
 *
 * File databases run in WAL mode with a busy timeout. Write transactions
 * open with `BEGIN IMMEDIATE` (`begin_write`) and hold the write lock from
 * their first statement; concurrent writers wait out `BUSY_TIMEOUT`.
 *
 * # Error Handling
 *
 * Unlike optional services, the database is required: connection and
 * migration failures are returned to the caller and abort startup.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Maximum pooled connections for file-backed databases
pub const MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked database before giving up
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool for `database_url` (`sqlite://path` or `sqlite::memory:`)
///
/// # Example
///
/// ```rust,no_run
/// use userauths::backend::server::config::{connect_database, run_migrations};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = connect_database("sqlite://userauths.db").await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Open a private in-memory database
///
/// Each in-memory connection is its own database, so the pool is pinned to
/// a single connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Start a transaction that holds the write lock from its first statement
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Apply pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
