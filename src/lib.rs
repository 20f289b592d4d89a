//! userauths - Main Library
//!
//! userauths is an account and session backend: email-based login issuing
//! signed JWT pairs, registration with password-strength validation, and a
//! one-time-code password reset flow, served over a small JSON HTTP API.
//!
//! # Module Structure
//!
//! - **`shared`** - Transport-free types
//!   - Application configuration (`AppConfig`)
//!   - Field-scoped validation errors (`FieldErrors`)
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and middleware
//!   - Account/Profile persistence on SQLite (sqlx)
//!   - Handle derivation, password policy, OTP and JWT issuance
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the
//!   `userauths-server` binary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use userauths::backend::server::init::{build_state, create_app};
//! use userauths::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let state = build_state(config).await?;
//! let app = create_app(state);
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
