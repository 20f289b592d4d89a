//! Backend Module
//!
//! This module contains all server-side code: an Axum HTTP server exposing
//! account registration, JWT login, and the password reset flow over a
//! SQLite database.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database setup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Accounts, profiles, passwords, OTPs, JWT tokens and handlers
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `SqlitePool`, the JWT keys and the configuration.
//! It is cloned into every handler; there is no in-process mutable state,
//! so every consistency guarantee comes from database transactions and
//! constraints.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. `BackendError` implements
//! `IntoResponse`, mapping validation failures to 400 field maps,
//! authentication failures to 401 and everything else to a logged 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{build_state, create_app, AppState};
