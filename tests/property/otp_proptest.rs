//! Property-based tests for one-time codes

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use userauths::backend::auth::otp::{generate_otp, is_fresh, is_well_formed, OTP_LENGTH};

proptest! {
    #[test]
    fn test_generated_codes_are_six_digits(_ in 0..200u32) {
        let code = generate_otp().unwrap();
        prop_assert_eq!(code.len(), OTP_LENGTH);
        prop_assert!(is_well_formed(&code));
    }

    #[test]
    fn test_freshness_boundary(age in 0i64..3_600, lifetime in 1i64..3_600) {
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let now = issued + Duration::seconds(age);
        prop_assert_eq!(is_fresh(Some(issued), Duration::seconds(lifetime), now), age <= lifetime);
    }
}

#[test]
fn test_every_digit_appears() {
    let mut seen = [false; 10];
    for _ in 0..500 {
        for b in generate_otp().unwrap().bytes() {
            seen[(b - b'0') as usize] = true;
        }
    }
    assert!(seen.iter().all(|s| *s));
}
