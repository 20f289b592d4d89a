//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `Validation` - Field-scoped input errors (400)
//! - `AuthenticationFailed` / `InvalidToken` / `NotAuthenticated` - (401)
//! - `NotFound` - (404)
//! - `Database` / `Token` / `PasswordHash` / `Internal` - (500)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
