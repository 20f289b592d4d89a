//! Database test fixtures and utilities
//!
//! Every fixture gets a private SQLite database with migrations applied.
//! Most use an in-memory database; tests that need several connections
//! writing at once use a file in a temporary directory.

use sqlx::SqlitePool;
use tempfile::TempDir;
use userauths::backend::server::config::{connect_database, connect_in_memory, run_migrations};

/// Create a migrated in-memory database pool
pub async fn create_test_pool() -> SqlitePool {
    let pool = connect_in_memory()
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Create a migrated file-backed pool inside `dir`, as the server opens it
pub async fn create_file_test_pool(dir: &TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("userauths.db").display());
    let pool = connect_database(&url)
        .await
        .expect("Failed to open file database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Row counts of both tables, as (users, profiles)
pub async fn row_counts(pool: &SqlitePool) -> (i64, i64) {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("count users");
    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await
        .expect("count profiles");
    (users, profiles)
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a new test database fixture
    pub async fn new() -> Self {
        Self {
            pool: create_test_pool().await,
        }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
