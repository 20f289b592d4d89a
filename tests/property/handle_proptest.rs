//! Property-based tests for handle derivation

use std::collections::HashSet;

use proptest::prelude::*;
use regex::Regex;
use userauths::backend::auth::handles::{
    generate_unique_username_from_email_prefix, sanitize_username, FALLBACK_USERNAME, USERNAME_MAX_LENGTH,
};

fn only_allowed_characters(handle: &str) -> bool {
    Regex::new(r"^[\w.@+-]+$").unwrap().is_match(handle)
}

proptest! {
    #[test]
    fn test_generated_handle_is_free_and_bounded(
        local in "\\PC{0,130}",
        taken in prop::collection::vec("[a-z0-9]{0,4}", 0..20),
    ) {
        let email = format!("{}@example.com", local);
        let base = sanitize_username(&local);

        // occupy the base and its first few counters as well as random handles
        let mut taken: HashSet<String> = taken.into_iter().collect();
        taken.insert(base.clone());
        for n in 1..4 {
            taken.insert(format!("{}{}", base, n));
        }

        let handle = generate_unique_username_from_email_prefix(&email, |h| taken.contains(h));

        prop_assert!(!taken.contains(&handle));
        prop_assert!(handle.chars().count() <= USERNAME_MAX_LENGTH);
        prop_assert!(!handle.is_empty());
    }

    #[test]
    fn test_sanitized_handle_uses_allowed_characters(raw in "\\PC{0,200}") {
        let handle = sanitize_username(&raw);
        prop_assert!(only_allowed_characters(&handle));
        prop_assert!(handle.chars().count() <= USERNAME_MAX_LENGTH);
        prop_assert!(!handle.is_empty());
    }

    #[test]
    fn test_clean_prefix_is_kept_verbatim(local in "[a-z][a-z0-9._+-]{0,40}") {
        let email = format!("{}@example.com", local);
        let handle = generate_unique_username_from_email_prefix(&email, |_| false);
        prop_assert_eq!(handle, local);
    }
}

#[test]
fn test_empty_prefix_uses_fallback() {
    let handle = generate_unique_username_from_email_prefix("!!!@example.com", |_| false);
    assert_eq!(handle, FALLBACK_USERNAME);
}
