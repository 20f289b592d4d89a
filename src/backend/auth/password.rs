/**
 * Password Policy
 *
 * Strength checks applied at registration and at password change. Every
 * validator runs and all failures are reported together, in this order:
 *
 * 1. Similarity to the account's username, first name, last name or email
 * 2. Minimum length (8 characters)
 * 3. Membership in the embedded common-password list
 * 4. Entirely numeric
 */

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Similarity ratio at or above which a password is rejected
pub const MAX_SIMILARITY: f64 = 0.7;

lazy_static! {
    static ref COMMON_PASSWORDS: HashSet<&'static str> = include_str!("common_passwords.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("non-word separator is a valid regex");
}

/// The account attributes a password is compared against
///
/// At registration this is built from the submitted fields before any row
/// exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordCandidate<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

impl<'a> PasswordCandidate<'a> {
    fn attributes(&self) -> [(&'static str, &'a str); 4] {
        [
            ("username", self.username),
            ("first name", self.first_name),
            ("last name", self.last_name),
            ("email address", self.email),
        ]
    }
}

/// Run every validator, returning all failure messages
pub fn validate_password(password: &str, candidate: Option<&PasswordCandidate<'_>>) -> Result<(), Vec<String>> {
    let mut messages = Vec::new();

    if let Some(candidate) = candidate {
        if let Some(attribute) = too_similar_attribute(password, candidate) {
            messages.push(format!("The password is too similar to the {}.", attribute));
        }
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        messages.push(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }

    if is_common_password(password) {
        messages.push("This password is too common.".to_string());
    }

    if is_entirely_numeric(password) {
        messages.push("This password is entirely numeric.".to_string());
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(messages)
    }
}

/// Name of the first attribute the password is too similar to
fn too_similar_attribute(password: &str, candidate: &PasswordCandidate<'_>) -> Option<&'static str> {
    let password = password.to_lowercase();

    for (name, value) in candidate.attributes() {
        if value.is_empty() {
            continue;
        }
        let value = value.to_lowercase();
        let parts = NON_WORD
            .split(&value)
            .chain(std::iter::once(value.as_str()));

        for part in parts {
            if exceeds_maximum_length_ratio(&password, part) {
                continue;
            }
            if similarity_ratio(&password, part) >= MAX_SIMILARITY {
                return Some(name);
            }
        }
    }
    None
}

/// Skip comparisons where the password dwarfs the attribute
fn exceeds_maximum_length_ratio(password: &str, value: &str) -> bool {
    let password_len = password.chars().count();
    let value_len = value.chars().count();
    let length_bound_similarity = MAX_SIMILARITY / 2.0 * password_len as f64;
    password_len >= 10 * value_len && (value_len as f64) < length_bound_similarity
}

/// Character-multiset similarity in `[0, 1]`
///
/// `2 * M / (len(a) + len(b))` where `M` counts characters the two strings
/// have in common, respecting multiplicity. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len + b_len == 0 {
        return 1.0;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    for c in a.chars() {
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    2.0 * matches as f64 / (a_len + b_len) as f64
}

pub fn is_common_password(password: &str) -> bool {
    COMMON_PASSWORDS.contains(password.trim().to_lowercase().as_str())
}

pub fn is_entirely_numeric(password: &str) -> bool {
    !password.is_empty() && password.chars().all(|c| c.is_numeric())
}
