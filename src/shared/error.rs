//! Shared Error Types
//!
//! This module defines error types that do not depend on the HTTP layer.
//!
//! `FieldErrors` maps a request field name to human-readable messages.
//! Problems that belong to no single field (an unparseable body, say) are
//! filed under `NON_FIELD_ERRORS`.
//!
//! # Usage
//!
//! ```rust
//! use userauths::shared::error::FieldErrors;
//!
//! let mut errors = FieldErrors::new();
//! errors.add("password", "Password fields didn't match.");
//! assert!(errors.contains_field("password"));
//! assert!(!errors.is_empty());
//! ```
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key for messages about the request as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field-scoped validation messages
///
/// Serializes as a plain JSON object, e.g.
/// `{"email": ["Enter a valid email address."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error map holding one message for one field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append a message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Append several messages to a field
    pub fn extend(&mut self, field: &str, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field (empty if none)
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}
