//! Property-based tests for the password policy

use proptest::prelude::*;
use userauths::backend::auth::password::{
    similarity_ratio, validate_password, PasswordCandidate, MIN_PASSWORD_LENGTH,
};

proptest! {
    #[test]
    fn test_short_passwords_always_fail(password in "\\PC{0,7}") {
        let messages = validate_password(&password, None).unwrap_err();
        let too_short = format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_LENGTH
        );
        prop_assert!(messages.contains(&too_short));
    }

    #[test]
    fn test_numeric_passwords_always_fail(password in "[0-9]{1,20}") {
        let messages = validate_password(&password, None).unwrap_err();
        prop_assert!(messages.contains(&"This password is entirely numeric.".to_string()));
    }

    #[test]
    fn test_password_equal_to_username_fails(username in "[a-z]{8,20}") {
        let candidate = PasswordCandidate {
            username: &username,
            ..Default::default()
        };
        let messages = validate_password(&username, Some(&candidate)).unwrap_err();
        prop_assert!(messages.contains(&"The password is too similar to the username.".to_string()));
    }

    #[test]
    fn test_similarity_is_symmetric_and_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let ab = similarity_ratio(&a, &b);
        let ba = similarity_ratio(&b, &a);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-12);
    }
}
