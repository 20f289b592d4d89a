//! Shared Module
//!
//! This module contains types that do not depend on the HTTP stack:
//! application configuration and the field-scoped validation error map
//! used by every request validator.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::{FieldErrors, NON_FIELD_ERRORS};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
