//! Credential helpers for pseudonymous accounts

mod password;

pub use password::{hash_password, verify_password, PasswordError};
