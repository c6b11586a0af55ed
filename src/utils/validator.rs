//! # Text Input Validation Utilities
//!
//! This module provides validation utilities for user input: email and phone
//! number format checks used by the registration and profile endpoints.

use std::sync::LazyLock;

use regex::Regex;

/// Email validation regex pattern
///
/// Accepts the usual local-part characters and requires a dotted domain.
/// Any deliverable-looking address passes; there is no domain allowlist.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

/// Phone number validation regex pattern
///
/// Accepts an optional leading `+` followed by 7 to 20 digits with optional
/// spaces or dashes between groups. Examples:
/// - `+254700123456` ✓ Valid
/// - `0700 123 456` ✓ Valid
/// - `phone` ✗ Invalid
pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").expect("Failed to compile phone regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(EMAIL_REGEX.is_match("c1@x.com"));
        assert!(EMAIL_REGEX.is_match("first.last+tag@sub.example.co.ke"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!EMAIL_REGEX.is_match("not-an-email"));
        assert!(!EMAIL_REGEX.is_match("user@nodot"));
        assert!(!EMAIL_REGEX.is_match("@example.com"));
    }

    #[test]
    fn phone_regex_accepts_common_formats() {
        assert!(PHONE_REGEX.is_match("+254700123456"));
        assert!(PHONE_REGEX.is_match("0700 123 456"));
        assert!(PHONE_REGEX.is_match("0700-123-456"));
    }

    #[test]
    fn phone_regex_rejects_non_numbers() {
        assert!(!PHONE_REGEX.is_match("phone"));
        assert!(!PHONE_REGEX.is_match("12345"));
        assert!(!PHONE_REGEX.is_match("+"));
    }
}
