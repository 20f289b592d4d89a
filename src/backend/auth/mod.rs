//! Authentication Module
//!
//! This module handles accounts, registration, password resets and
//! session tokens.
//!
//! # Architecture
//!
//! - **`users`** / **`profiles`** - Data models and database operations
//! - **`accounts`** - Transactional create/update keeping profiles in sync
//! - **`handles`** - Handle derivation from email prefixes
//! - **`password`** - Password strength policy
//! - **`otp`** - One-time code generation
//! - **`reset`** - Password reset issuance and redemption
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs               - Module exports and documentation
//! ├── users.rs             - User model and database operations
//! ├── profiles.rs          - Profile model and sync
//! ├── accounts.rs          - create_account / update_account
//! ├── handles.rs           - Handle derivation
//! ├── password.rs          - Password validators
//! ├── common_passwords.txt - Embedded common-password list
//! ├── otp.rs               - Reset codes
//! ├── reset.rs             - Reset flow
//! ├── sessions.rs          - JWT token management
//! └── handlers/            - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email, password twice, names → account + profile created
//! 2. **Login**: email + password → access/refresh pair with identity claims
//! 3. **Refresh**: refresh token → new access token
//! 4. **Reset**: email → OTP + reset link; OTP + new password → password changed
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access tokens expire after 5 minutes, refresh tokens after 1 day (configurable)
//! - Reset codes expire after 10 minutes and are single use
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// Profile data model and database operations
pub mod profiles;

/// Account create/update use cases
pub mod accounts;

/// Handle derivation
pub mod handles;

/// Password policy
pub mod password;

/// One-time codes
pub mod otp;

/// Password reset flow
pub mod reset;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use accounts::{create_account, update_account, AccountUpdate, NewAccount};
pub use handlers::{get_profile, login, password_change, password_reset, refresh_token, register, update_profile};
pub use sessions::{Claims, JwtKeys, TokenPair, TokenType};
pub use users::User;
