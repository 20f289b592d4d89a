/**
 * Authentication Handler Types
 *
 * Request and response bodies for the authentication endpoints.
 *
 * Request fields are `Option`s so that a missing field becomes a
 * field-scoped validation message instead of a body rejection;
 * `RequiredFields` collects those messages.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::profiles::Profile;
use crate::backend::auth::users::User;
use crate::shared::FieldErrors;

pub const FIELD_REQUIRED: &str = "This field is required.";
pub const FIELD_BLANK: &str = "This field may not be blank.";

/// Maximum length of the profile `about` text
pub const ABOUT_MAX_LENGTH: usize = 500;

/// Collects missing/blank-field messages across a request
#[derive(Debug, Default)]
pub struct RequiredFields {
    errors: FieldErrors,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a required field, recording a message if missing or blank
    pub fn take<'a>(&mut self, field: &str, value: &'a Option<String>) -> &'a str {
        match value.as_deref() {
            None => {
                self.errors.add(field, FIELD_REQUIRED);
                ""
            }
            Some(v) if v.trim().is_empty() => {
                self.errors.add(field, FIELD_BLANK);
                ""
            }
            Some(v) => v,
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Refresh request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Confirmation; must equal `password`
    pub password2: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Password change request (completes a reset)
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PasswordChangeRequest {
    pub otp: Option<String>,
    /// Account primary key, as a number or a numeric string
    pub uuidb64: Option<serde_json::Value>,
    pub password: Option<String>,
}

/// Profile update request; absent fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about: Option<String>,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// Login response
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserResponse,
}

/// Refresh response
#[derive(Serialize, Deserialize, Debug)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Password reset initiation response
#[derive(Serialize, Deserialize, Debug)]
pub struct PasswordResetResponse {
    pub email: String,
    pub username: String,
    pub reset_link: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileResponse {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub about: Option<String>,
    pub image: Option<String>,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            full_name: profile.full_name,
            about: profile.about,
            image: profile.image,
            date: profile.date,
        }
    }
}
