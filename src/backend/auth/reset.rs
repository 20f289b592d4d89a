/**
 * Password Reset
 *
 * Two steps:
 *
 * 1. `begin_password_reset` - stores a fresh OTP (stamped with its issue
 *    time) and a freshly minted access token on the account, and builds
 *    the frontend link that carries them
 * 2. `complete_password_change` - redeems the OTP once, within its
 *    lifetime, and replaces the password hash
 *
 * A newer request overwrites the previous code and token.
 */

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::backend::auth::otp::{self, generate_otp};
use crate::backend::auth::sessions::{JwtKeys, TokenType};
use crate::backend::auth::users::{self, User};
use crate::backend::error::BackendError;
use crate::backend::server::config::begin_write;

pub const OTP_REJECTED: &str = "Invalid or expired one-time code.";

/// What the initiation step hands back to the caller
#[derive(Debug, Clone)]
pub struct ResetTicket {
    pub user: User,
    pub otp: String,
    pub token: String,
    pub reset_link: String,
}

/// `{frontend_base}/create-new-password/?otp=..&uuidb64=..&refresh_token=..`
pub fn build_reset_link(frontend_base: &str, otp: &str, user_id: i64, token: &str) -> String {
    format!(
        "{}/create-new-password/?otp={}&uuidb64={}&refresh_token={}",
        frontend_base.trim_end_matches('/'),
        otp,
        user_id,
        token
    )
}

/// Issue an OTP and reset token for the account with `email`
///
/// Returns `None` without touching anything when no such account exists.
pub async fn begin_password_reset(
    pool: &SqlitePool,
    keys: &JwtKeys,
    frontend_base: &str,
    email: &str,
) -> Result<Option<ResetTicket>, BackendError> {
    let mut tx = begin_write(pool).await?;

    let Some(mut user) = users::get_user_by_email(&mut *tx, email).await? else {
        return Ok(None);
    };

    let token = keys.create_token(&user, TokenType::Access)?;
    let otp = generate_otp().map_err(|e| BackendError::internal(format!("OS random source failed: {}", e)))?;
    let issued_at = Utc::now();

    users::set_password_reset(&mut *tx, user.id, &otp, issued_at, &token).await?;
    tx.commit().await?;

    user.otp = Some(otp.clone());
    user.otp_issued_at = Some(issued_at);
    user.refresh_token = Some(token.clone());

    let reset_link = build_reset_link(frontend_base, &otp, user.id, &token);
    tracing::info!("Password reset issued for user {}", user.id);

    Ok(Some(ResetTicket {
        user,
        otp,
        token,
        reset_link,
    }))
}

/// Redeem `code` for `user_id` and store `password_hash`
///
/// # Errors
///
/// `Validation` on `otp` when the account is unknown, no code is
/// outstanding, the code does not match, it is older than `otp_lifetime`,
/// or it was redeemed concurrently.
pub async fn complete_password_change(
    pool: &SqlitePool,
    user_id: i64,
    code: &str,
    password_hash: &str,
    otp_lifetime: Duration,
) -> Result<User, BackendError> {
    let rejected = || BackendError::validation("otp", OTP_REJECTED);

    let mut tx = begin_write(pool).await?;

    let user = users::get_user_by_id(&mut *tx, user_id).await?.ok_or_else(rejected)?;
    let matches = user.otp.as_deref() == Some(code) && otp::is_well_formed(code);
    if !matches || !otp::is_fresh(user.otp_issued_at, otp_lifetime, Utc::now()) {
        tracing::warn!("Rejected password change for user {}", user_id);
        return Err(rejected());
    }

    if !users::redeem_password_reset(&mut *tx, user_id, code, password_hash).await? {
        return Err(rejected());
    }

    let user = users::get_user_by_id(&mut *tx, user_id).await?.ok_or_else(rejected)?;
    tx.commit().await?;

    tracing::info!("Password changed for user {}", user_id);
    Ok(user)
}

/// Check a code without redeeming it
pub fn verify_reset_code(user: &User, code: &str, otp_lifetime: Duration) -> Result<(), BackendError> {
    if user.otp.as_deref() == Some(code) && otp::is_fresh(user.otp_issued_at, otp_lifetime, Utc::now()) {
        Ok(())
    } else {
        Err(BackendError::validation("otp", OTP_REJECTED))
    }
}
