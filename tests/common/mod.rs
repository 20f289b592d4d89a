//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - The in-process application driver and authentication helpers
//! - Assertion helpers for JSON error bodies

pub mod database;

// Re-export commonly used utilities
pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
