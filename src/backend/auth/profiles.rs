/**
 * Profile Model and Database Operations
 *
 * Every account owns exactly one profile row (`profiles.user_id` is
 * UNIQUE and cascades on delete). The profile mirrors the account's full
 * name; `sync_profile` is the single place that keeps the two aligned.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteConnection, SqliteExecutor};

use crate::backend::auth::users::User;

/// Image reference stored for new profiles
pub const DEFAULT_PROFILE_IMAGE: &str = "default.jpg";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub image: Option<String>,
    pub full_name: String,
    pub about: Option<String>,
    pub date: DateTime<Utc>,
}

pub async fn get_profile_by_user_id<'e, E>(executor: E, user_id: i64) -> Result<Option<Profile>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Profile>(
        "SELECT id, user_id, image, full_name, about, date FROM profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert_profile<'e, E>(executor: E, user_id: i64, full_name: &str) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO profiles (user_id, image, full_name, date)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(DEFAULT_PROFILE_IMAGE)
    .bind(full_name)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_profile_full_name<'e, E>(executor: E, user_id: i64, full_name: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE profiles SET full_name = $1 WHERE user_id = $2")
        .bind(full_name)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn update_profile_about<'e, E>(executor: E, user_id: i64, about: Option<&str>) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE profiles SET about = $1 WHERE user_id = $2")
        .bind(about)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Bring the user's profile in line with the account
///
/// Creates the profile when it is missing; otherwise rewrites `full_name`
/// only if it differs.
pub async fn sync_profile(conn: &mut SqliteConnection, user: &User) -> Result<Profile, sqlx::Error> {
    match get_profile_by_user_id(&mut *conn, user.id).await? {
        None => {
            insert_profile(&mut *conn, user.id, &user.full_name).await?;
            tracing::debug!("Created profile for user {}", user.id);
        }
        Some(profile) if profile.full_name != user.full_name => {
            update_profile_full_name(&mut *conn, user.id, &user.full_name).await?;
        }
        Some(profile) => return Ok(profile),
    }

    get_profile_by_user_id(&mut *conn, user.id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}
