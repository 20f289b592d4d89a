//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints, one submodule per
//! endpoint.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs              - Module exports and documentation
//! ├── types.rs            - Request and response types
//! ├── login.rs            - Token pair issuance
//! ├── refresh.rs          - Access token refresh
//! ├── register.rs         - Account registration
//! ├── password_reset.rs   - Reset code issuance
//! ├── password_change.rs  - Reset code redemption
//! └── profile.rs          - Authenticated profile read/update
//! ```
//!
//! # Handlers
//!
//! - **`login`** - POST /api/v1/user/token/
//! - **`refresh_token`** - POST /api/v1/user/token/refresh/
//! - **`register`** - POST /api/v1/user/register/
//! - **`password_reset`** - GET /api/v1/user/password-reset/{email}/
//! - **`password_change`** - POST /api/v1/user/password-change/
//! - **`get_profile`** / **`update_profile`** - GET/PATCH /api/v1/user/profile/
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{routing::post, Router};
//! use userauths::backend::auth::handlers::{login, register};
//! use userauths::backend::server::AppState;
//!
//! fn routes() -> Router<AppState> {
//!     Router::new()
//!         .route("/user/token/", post(login))
//!         .route("/user/register/", post(register))
//! }
//! ```

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Token refresh handler
pub mod refresh;

/// Registration handler
pub mod register;

/// Password reset initiation handler
pub mod password_reset;

/// Password change handler
pub mod password_change;

/// Profile handlers
pub mod profile;

// Re-export commonly used types
pub use types::{
    AccessTokenResponse, LoginRequest, MessageResponse, PasswordChangeRequest, PasswordResetResponse,
    ProfileResponse, ProfileUpdateRequest, RefreshRequest, RegisterRequest, TokenPairResponse, UserResponse,
};

// Re-export handlers
pub use login::login;
pub use password_change::password_change;
pub use password_reset::password_reset;
pub use profile::{get_profile, update_profile};
pub use refresh::refresh_token;
pub use register::register;
