//! Email type checks

use alloc::string::{String, ToString};

/// Validates email format
///
/// With the `rfc-email` feature the address must parse under RFC 5322.
/// Either way, only unquoted ASCII addresses are accepted, as user agents do
/// for `type="email"`.
#[cfg(feature = "rfc-email")]
pub fn is_valid_email(email: &str) -> bool {
    email.is_ascii()
        && !email.contains(['"', '[', ' '])
        && email_address::EmailAddress::is_valid(email)
}

/// Validates basic email format
///
/// Checks for:
/// - Exactly one '@' symbol
/// - Content before and after '@'
/// - At least one '.' in the domain part
/// - A top-level domain of two or more characters
#[cfg(not(feature = "rfc-email"))]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    // Domain can't start or end with dot or hyphen
    if domain.starts_with('.') || domain.ends_with('.')
        || domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    if domain.contains("..") {
        return false;
    }

    let valid_local_chars = |c: char| {
        c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' || c == '+'
    };
    if !local.chars().all(valid_local_chars) {
        return false;
    }

    let valid_domain_chars = |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '-';
    if !domain.chars().all(valid_domain_chars) {
        return false;
    }

    match domain.rfind('.') {
        Some(pos) => domain[pos + 1..].len() >= 2,
        None => false,
    }
}

/// `type="email"`
pub fn validate_email(value: &str) -> Result<(), String> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err("Please enter an email address.".to_string())
    }
}
