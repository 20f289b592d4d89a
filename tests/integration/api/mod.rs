//! API integration tests
//!
//! Integration tests for all API endpoints, driven through the full router

mod auth_test;
mod register_test;
