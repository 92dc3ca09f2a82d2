//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Deliberately loose: something, an `@`, something, a dot, something.
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^@]+@[^@]+\.[^@]+").unwrap();
    static ref SLUG: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Length of a Brazilian state (UF) code.
pub const REGION_CODE_LEN: usize = 2;

/// Returns true when the value looks like an email address.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Trims and uppercases a region code.
///
/// Returns `None` unless the result is exactly two characters.
pub fn normalize_region_code(value: &str) -> Option<String> {
    let code = value.trim().to_uppercase();
    if code.chars().count() == REGION_CODE_LEN {
        Some(code)
    } else {
        None
    }
}

/// Returns true for lowercase, hyphen-separated, URL-safe slugs.
pub fn is_valid_slug(value: &str) -> bool {
    SLUG.is_match(value)
}

/// `validator` hook for slug fields.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_slug");
        err.message = Some(
            "Slug may only contain lowercase letters, digits and single hyphens".into(),
        );
        Err(err)
    }
}
