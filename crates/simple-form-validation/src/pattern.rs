//! `pattern` attribute matching

use regex::Regex;

/// A compiled `pattern` attribute
///
/// The attribute must match the whole value, so the source is anchored
/// as `^(?:pattern)$` before compiling.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The attribute value as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Empty values never mismatch; `required` covers those.
pub fn validate_pattern(value: &str, pattern: &Pattern) -> Result<(), String> {
    if value.is_empty() || pattern.is_match(value) {
        Ok(())
    } else {
        Err("Please match the requested format.".to_string())
    }
}
