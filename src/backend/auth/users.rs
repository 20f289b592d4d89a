/**
 * User Model and Database Operations
 *
 * This module handles the `users` table: the Account record keyed by
 * email and identified publicly by its handle (`username`).
 *
 * Single-statement operations accept any SQLite executor, so they work
 * with the pool or inside a transaction (`&mut *tx`). Multi-step writes
 * that must be atomic live in `accounts`.
 */

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use sqlx::SqliteExecutor;

/// User struct representing an account row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Primary key
    pub id: i64,
    /// Login identifier (unique)
    pub email: String,
    /// Handle (unique)
    pub username: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Derived from first and last name, falling back to the handle
    pub full_name: String,
    /// Outstanding password reset code
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    #[serde(skip_serializing)]
    pub otp_issued_at: Option<DateTime<Utc>>,
    /// Token minted alongside the outstanding reset code
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// Column values for a new account row
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub full_name: &'a str,
}

const USER_COLUMNS: &str = "id, email, username, password_hash, first_name, last_name, full_name, \
                            otp, otp_issued_at, refresh_token, is_active, date_joined";

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    )
    .expect("email pattern is a valid regex");
}

/// Basic structural email check (local@domain.tld)
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// `first last` with surrounding whitespace trimmed, or the handle if that is empty
pub fn full_name_for(first_name: &str, last_name: &str, username: &str) -> String {
    let joined = format!("{} {}", first_name.trim(), last_name.trim());
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        username.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Whether a sqlx error is a UNIQUE violation on `column` (e.g. `users.email`)
pub fn is_unique_violation(err: &sqlx::Error, column: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation() && db_err.message().contains(column),
        _ => false,
    }
}

/// Insert a new user, returning its id
///
/// # Errors
///
/// Fails with a UNIQUE violation when the email or username is taken; see
/// `is_unique_violation`.
pub async fn insert_user<'e, E>(executor: E, new_user: &NewUser<'_>) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO users (email, username, password_hash, first_name, last_name, full_name, date_joined)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(new_user.email)
    .bind(new_user.username)
    .bind(new_user.password_hash)
    .bind(new_user.first_name)
    .bind(new_user.last_name)
    .bind(new_user.full_name)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get user by email
pub async fn get_user_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// Get user by ID
pub async fn get_user_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn email_exists<'e, E>(executor: E, email: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
}

pub async fn username_exists<'e, E>(executor: E, username: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(executor)
        .await
}

/// Overwrite name fields (full name is stored as given)
pub async fn update_user_names<'e, E>(
    executor: E,
    id: i64,
    first_name: &str,
    last_name: &str,
    full_name: &str,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET first_name = $1, last_name = $2, full_name = $3
        WHERE id = $4
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(full_name)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Store a freshly issued reset code and token, replacing any previous pair
pub async fn set_password_reset<'e, E>(
    executor: E,
    id: i64,
    otp: &str,
    issued_at: DateTime<Utc>,
    refresh_token: &str,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET otp = $1, otp_issued_at = $2, refresh_token = $3
        WHERE id = $4
        "#,
    )
    .bind(otp)
    .bind(issued_at)
    .bind(refresh_token)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Replace the password hash and consume the reset code
///
/// Only succeeds while the row still holds `otp`, so a code can be redeemed
/// at most once even under concurrent requests.
pub async fn redeem_password_reset<'e, E>(
    executor: E,
    id: i64,
    otp: &str,
    password_hash: &str,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $1, otp = NULL, otp_issued_at = NULL, refresh_token = NULL
        WHERE id = $2 AND otp = $3
        "#,
    )
    .bind(password_hash)
    .bind(id)
    .bind(otp)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Delete a user; the profile goes with it (ON DELETE CASCADE)
pub async fn delete_user<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}
