//! Shared utilities for the registration portal backend.
//!
//! This crate provides functionality used across the other crates:
//! - Password hashing with Argon2id
//! - Signed session tokens for the admin cookie
//! - Common validation logic (email shape, region codes, slugs)

pub mod password;
pub mod session;
pub mod validation;
