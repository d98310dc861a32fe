// File: src/error.rs
// Purpose: API misuse errors (validation failures are data, see validity.rs)

use crate::control::ControlId;

/// Errors returned by form operations
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The handle does not name a control in this form (never added, or removed)
    #[error("unknown control {0}")]
    UnknownControl(ControlId),

    /// A `pattern` constraint that does not compile
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, FormError>;
