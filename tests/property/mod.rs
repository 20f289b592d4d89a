//! Property-based tests

mod handle_proptest;
mod otp_proptest;
mod password_proptest;
