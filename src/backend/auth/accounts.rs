/**
 * Account Use Cases
 *
 * Every write that must keep an account and its profile consistent goes
 * through here, inside a single `BEGIN IMMEDIATE` transaction:
 *
 * - `create_account` resolves the handle, derives the full name, inserts
 *   the user and creates its profile
 * - `update_account` applies name changes, re-derives the full name and
 *   re-syncs the profile
 *
 * # Handle reservation
 *
 * Candidates from `handles::username_candidate` are probed with an
 * existence check and then inserted. The UNIQUE constraint on
 * `users.username` is the final arbiter: if a concurrent registration
 * claims the same candidate between the check and the insert, the insert
 * fails and the next candidate is tried, at most `MAX_RESERVE_ATTEMPTS`
 * times.
 */

use sqlx::{SqliteConnection, SqlitePool};

use crate::backend::auth::handles::{email_prefix, sanitize_username, username_candidate};
use crate::backend::auth::profiles::{self, Profile};
use crate::backend::auth::users::{self, full_name_for, is_unique_violation, NewUser, User};
use crate::backend::error::BackendError;
use crate::backend::server::config::begin_write;

/// Lost insert races tolerated before giving up on a handle
pub const MAX_RESERVE_ATTEMPTS: u32 = 32;

pub const EMAIL_TAKEN: &str = "user with this email already exists.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Input for `create_account`; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Explicit handle; derived from the email when `None`
    pub username: Option<String>,
}

/// Partial update for `update_account`; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Profile bio; an empty string clears it
    pub about: Option<String>,
}

/// Create an account and its profile atomically
///
/// # Errors
///
/// - `Validation` on `email` when the email is already registered
/// - `Validation` on `username` when an explicit handle is taken
/// - `Internal` when no free handle could be reserved
pub async fn create_account(pool: &SqlitePool, account: NewAccount) -> Result<(User, Profile), BackendError> {
    let mut tx = begin_write(pool).await?;

    let user_id = match account.username.as_deref() {
        Some(username) => insert_account(&mut tx, &account, username).await?,
        None => reserve_username(&mut tx, &account).await?,
    };

    let user = users::get_user_by_id(&mut *tx, user_id)
        .await?
        .ok_or_else(|| BackendError::internal("inserted user vanished"))?;
    let profile = profiles::sync_profile(&mut tx, &user).await?;

    tx.commit().await?;

    tracing::info!("Account created: id={} username={}", user.id, user.username);
    Ok((user, profile))
}

/// Apply a partial update and re-sync the profile atomically
pub async fn update_account(
    pool: &SqlitePool,
    user_id: i64,
    update: AccountUpdate,
) -> Result<(User, Profile), BackendError> {
    let mut tx = begin_write(pool).await?;

    let current = users::get_user_by_id(&mut *tx, user_id)
        .await?
        .ok_or_else(|| BackendError::NotFound(format!("user {}", user_id)))?;

    let first_name = update.first_name.unwrap_or(current.first_name);
    let last_name = update.last_name.unwrap_or(current.last_name);
    let full_name = full_name_for(&first_name, &last_name, &current.username);
    users::update_user_names(&mut *tx, user_id, &first_name, &last_name, &full_name).await?;

    let user = users::get_user_by_id(&mut *tx, user_id)
        .await?
        .ok_or_else(|| BackendError::NotFound(format!("user {}", user_id)))?;
    let mut profile = profiles::sync_profile(&mut tx, &user).await?;

    if let Some(about) = update.about {
        let about = Some(about.as_str()).filter(|a| !a.trim().is_empty());
        profiles::update_profile_about(&mut *tx, user_id, about).await?;
        profile.about = about.map(str::to_string);
    }

    tx.commit().await?;

    tracing::info!("Account updated: id={}", user.id);
    Ok((user, profile))
}

/// Insert with a handle derived from the email, retrying on lost races
async fn reserve_username(conn: &mut SqliteConnection, account: &NewAccount) -> Result<i64, BackendError> {
    let base = sanitize_username(email_prefix(&account.email));
    let mut attempt = 0u32;
    let mut lost_races = 0u32;

    loop {
        let candidate = username_candidate(&base, attempt);
        attempt += 1;

        if users::username_exists(&mut *conn, &candidate).await? {
            continue;
        }

        match insert_account(&mut *conn, account, &candidate).await {
            Ok(id) => return Ok(id),
            Err(BackendError::Validation(errors)) if errors.contains_field("username") => {
                lost_races += 1;
                tracing::debug!("Handle {} claimed concurrently, retrying", candidate);
                if lost_races >= MAX_RESERVE_ATTEMPTS {
                    return Err(BackendError::internal(format!(
                        "could not reserve a handle for prefix {} after {} attempts",
                        base, MAX_RESERVE_ATTEMPTS
                    )));
                }
            }
            Err(e) => return Err(e),
        }
    }
}

async fn insert_account(conn: &mut SqliteConnection, account: &NewAccount, username: &str) -> Result<i64, BackendError> {
    let full_name = full_name_for(&account.first_name, &account.last_name, username);
    let new_user = NewUser {
        email: &account.email,
        username,
        password_hash: &account.password_hash,
        first_name: &account.first_name,
        last_name: &account.last_name,
        full_name: &full_name,
    };

    users::insert_user(&mut *conn, &new_user).await.map_err(|e| {
        if is_unique_violation(&e, "users.email") {
            BackendError::validation("email", EMAIL_TAKEN)
        } else if is_unique_violation(&e, "users.username") {
            BackendError::validation("username", USERNAME_TAKEN)
        } else {
            e.into()
        }
    })
}
