//! Database integration tests

mod cascade_test;
