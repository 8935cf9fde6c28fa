//! Client-side e-mail format check.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// Hint shown under an e-mail field that failed validation.
pub const INVALID_EMAIL_HINT: &str = "Enter a valid email";

/// `true` for an empty string (use a required marker for mandatory fields)
/// or something shaped like `user@host.tld`.
pub fn is_valid_email(value: &str) -> bool {
    value.is_empty() || EMAIL_PATTERN.is_match(value)
}
