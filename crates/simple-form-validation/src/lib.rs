//! Simple-Form-Validation Core
//!
//! Pure Rust constraint checks compatible with both std and no_std environments.
//! Each check mirrors one native form constraint (`required`, `minlength`,
//! `maxlength`, `min`, `max`, `step`, `pattern`, input type) and returns the
//! message a browser would show when the constraint fails.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod email;
pub mod numeric;
#[cfg(feature = "pattern")]
pub mod pattern;
pub mod string;

// Re-export all checks
pub use email::*;
pub use numeric::*;
#[cfg(feature = "pattern")]
pub use pattern::*;
pub use string::*;

/// Message for a required control left empty
pub const VALUE_MISSING: &str = "Please fill out this field.";

/// Message for a required select with nothing chosen
pub const VALUE_MISSING_SELECT: &str = "Please select an item in the list.";
