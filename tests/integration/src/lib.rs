//! Integration test support
//!
//! These tests exercise the full API against a running PostgreSQL and
//! Redis. They are skipped (pass vacuously) unless DATABASE_URL and
//! REDIS_URL are set.

pub mod fixtures;
pub mod helpers;

pub use helpers::{assert_json, assert_status, check_test_env, TestServer};
