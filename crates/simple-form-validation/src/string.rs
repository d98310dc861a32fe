//! String constraint checks

use alloc::format;
use alloc::string::{String, ToString};

/// Counts characters the way length constraints see them
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// `minlength`: empty values never fail, only partially filled ones do
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    let len = char_len(s);
    if len == 0 || len >= min {
        Ok(())
    } else {
        Err(format!(
            "Please lengthen this text to {} characters or more (you are currently using {} characters).",
            min, len
        ))
    }
}

/// `maxlength`
pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    let len = char_len(s);
    if len <= max {
        Ok(())
    } else {
        Err(format!(
            "Please shorten this text to {} characters or less (you are currently using {} characters).",
            max, len
        ))
    }
}

/// URL validation
///
/// With the `rfc-url` feature any absolute URL is accepted, matching what
/// user agents allow for `type="url"`. Otherwise only http(s) URLs with a
/// dotted host pass.
#[cfg(feature = "rfc-url")]
pub fn is_valid_url(url_str: &str) -> bool {
    url::Url::parse(url_str).is_ok()
}

#[cfg(not(feature = "rfc-url"))]
pub fn is_valid_url(url: &str) -> bool {
    let after_protocol = if let Some(after) = url.strip_prefix("https://") {
        after
    } else if let Some(after) = url.strip_prefix("http://") {
        after
    } else {
        return false;
    };

    let host = after_protocol.split('/').next().unwrap_or("");
    !host.is_empty() && host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

/// `type="url"`
pub fn validate_url(value: &str) -> Result<(), String> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err("Please enter a URL.".to_string())
    }
}
