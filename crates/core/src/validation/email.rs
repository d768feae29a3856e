//! Email address validation.

use std::sync::LazyLock;

use regex::Regex;

use super::Rejection;
use super::rules::EmailRules;

/// Permissive `local@domain.tld` shape.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validate an email address and return its canonical (trimmed, lowercase) form.
pub fn validate_email(rules: &EmailRules, raw: &str) -> Result<String, Rejection> {
    let email = raw.trim();

    if !EMAIL_SHAPE.is_match(email) {
        return Err(Rejection::new("Invalid email address format."));
    }
    if email.chars().count() > rules.max_length {
        return Err(Rejection::new("Email address is too long."));
    }

    Ok(email.to_lowercase())
}
