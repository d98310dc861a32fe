// File: src/validity.rs
// Purpose: Validity categories, their ranking, and the single-error extractor

use std::fmt;

use serde::Serialize;

use crate::control::Control;

/// Validity failure categories, declared in reporting priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidityKind {
    TypeMismatch,
    PatternMismatch,
    ValueMissing,
    TooLong,
    TooShort,
    RangeOverflow,
    RangeUnderflow,
    StepMismatch,
    BadInput,
    CustomError,
    /// Reported invalid without any specific category
    Invalid,
}

impl ValidityKind {
    /// Highest priority first; only the first failing category is reported
    pub const PRIORITY: [ValidityKind; 11] = [
        ValidityKind::TypeMismatch,
        ValidityKind::PatternMismatch,
        ValidityKind::ValueMissing,
        ValidityKind::TooLong,
        ValidityKind::TooShort,
        ValidityKind::RangeOverflow,
        ValidityKind::RangeUnderflow,
        ValidityKind::StepMismatch,
        ValidityKind::BadInput,
        ValidityKind::CustomError,
        ValidityKind::Invalid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "typeMismatch",
            Self::PatternMismatch => "patternMismatch",
            Self::ValueMissing => "valueMissing",
            Self::TooLong => "tooLong",
            Self::TooShort => "tooShort",
            Self::RangeOverflow => "rangeOverflow",
            Self::RangeUnderflow => "rangeUnderflow",
            Self::StepMismatch => "stepMismatch",
            Self::BadInput => "badInput",
            Self::CustomError => "customError",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ValidityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category validity flags of one control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityState {
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub value_missing: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_overflow: bool,
    pub range_underflow: bool,
    pub step_mismatch: bool,
    pub bad_input: bool,
    pub custom_error: bool,
    /// Overall verdict
    pub valid: bool,
}

impl Default for ValidityState {
    fn default() -> Self {
        Self {
            type_mismatch: false,
            pattern_mismatch: false,
            value_missing: false,
            too_long: false,
            too_short: false,
            range_overflow: false,
            range_underflow: false,
            step_mismatch: false,
            bad_input: false,
            custom_error: false,
            valid: true,
        }
    }
}

impl ValidityState {
    /// Whether a category is currently failing
    pub fn get(&self, kind: ValidityKind) -> bool {
        match kind {
            ValidityKind::TypeMismatch => self.type_mismatch,
            ValidityKind::PatternMismatch => self.pattern_mismatch,
            ValidityKind::ValueMissing => self.value_missing,
            ValidityKind::TooLong => self.too_long,
            ValidityKind::TooShort => self.too_short,
            ValidityKind::RangeOverflow => self.range_overflow,
            ValidityKind::RangeUnderflow => self.range_underflow,
            ValidityKind::StepMismatch => self.step_mismatch,
            ValidityKind::BadInput => self.bad_input,
            ValidityKind::CustomError => self.custom_error,
            ValidityKind::Invalid => !self.valid && !self.any_failure(),
        }
    }

    /// `Invalid` is derived from the other flags and cannot be set
    pub fn set(&mut self, kind: ValidityKind, on: bool) {
        let flag = match kind {
            ValidityKind::TypeMismatch => &mut self.type_mismatch,
            ValidityKind::PatternMismatch => &mut self.pattern_mismatch,
            ValidityKind::ValueMissing => &mut self.value_missing,
            ValidityKind::TooLong => &mut self.too_long,
            ValidityKind::TooShort => &mut self.too_short,
            ValidityKind::RangeOverflow => &mut self.range_overflow,
            ValidityKind::RangeUnderflow => &mut self.range_underflow,
            ValidityKind::StepMismatch => &mut self.step_mismatch,
            ValidityKind::BadInput => &mut self.bad_input,
            ValidityKind::CustomError => &mut self.custom_error,
            ValidityKind::Invalid => return,
        };
        *flag = on;
    }

    /// Any specific category failing
    pub fn any_failure(&self) -> bool {
        ValidityKind::PRIORITY
            .iter()
            .copied()
            .filter(|k| *k != ValidityKind::Invalid)
            .any(|k| self.get(k))
    }

    /// Highest-ranked failing category, `None` when valid
    pub fn first_failure(&self) -> Option<ValidityKind> {
        if self.valid {
            return None;
        }
        ValidityKind::PRIORITY.iter().copied().find(|k| self.get(*k))
    }

    /// Highest-ranked failing category that outranks `kind`
    pub(crate) fn first_failure_before(&self, kind: ValidityKind) -> Option<ValidityKind> {
        ValidityKind::PRIORITY
            .iter()
            .copied()
            .take_while(|k| *k != kind)
            .find(|k| self.get(*k))
    }
}

/// The single ranked error reported for an invalid control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidityError {
    pub kind: ValidityKind,
    pub message: String,
}

/// Reduces a validity state to at most one ranked error
pub fn rank(state: &ValidityState, message: &str) -> Option<ValidityError> {
    state.first_failure().map(|kind| ValidityError {
        kind,
        message: message.to_string(),
    })
}

/// The ranked error of a control, `None` when it is valid
///
/// Reads the control as it stands; custom validators must already have run.
pub fn extract(control: &Control) -> Option<ValidityError> {
    let state = control.validity();
    if state.valid {
        return None;
    }
    rank(&state, &control.validation_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Control, InputType};
    use rstest::rstest;

    fn failing(kinds: &[ValidityKind]) -> ValidityState {
        let mut state = ValidityState::default();
        for kind in kinds {
            state.set(*kind, true);
        }
        state.valid = !state.any_failure();
        state
    }

    #[test]
    fn test_priority_matches_declaration_order() {
        let mut sorted = ValidityKind::PRIORITY;
        sorted.sort();
        assert_eq!(sorted, ValidityKind::PRIORITY);
    }

    #[rstest]
    #[case(&[ValidityKind::CustomError, ValidityKind::TypeMismatch], ValidityKind::TypeMismatch)]
    #[case(&[ValidityKind::TooShort, ValidityKind::ValueMissing], ValidityKind::ValueMissing)]
    #[case(&[ValidityKind::BadInput, ValidityKind::StepMismatch], ValidityKind::StepMismatch)]
    #[case(&[ValidityKind::RangeUnderflow, ValidityKind::RangeOverflow], ValidityKind::RangeOverflow)]
    #[case(&[ValidityKind::CustomError], ValidityKind::CustomError)]
    fn test_first_failure_wins(#[case] kinds: &[ValidityKind], #[case] expected: ValidityKind) {
        let state = failing(kinds);
        assert_eq!(state.first_failure(), Some(expected));

        let mut reversed = kinds.to_vec();
        reversed.reverse();
        assert_eq!(failing(&reversed).first_failure(), Some(expected));
    }

    #[test]
    fn test_valid_state_ranks_nothing() {
        let state = ValidityState::default();
        assert!(state.valid);
        assert_eq!(rank(&state, "ignored"), None);
    }

    #[test]
    fn test_generic_invalid() {
        let state = ValidityState {
            valid: false,
            ..ValidityState::default()
        };
        assert!(state.get(ValidityKind::Invalid));
        let error = rank(&state, "Invalid value.").unwrap();
        assert_eq!(error.kind, ValidityKind::Invalid);
        assert_eq!(error.message, "Invalid value.");
    }

    #[test]
    fn test_any_failure_covers_every_specific_kind() {
        assert!(!ValidityState { valid: false, ..ValidityState::default() }.any_failure());
        for kind in ValidityKind::PRIORITY {
            let mut state = ValidityState::default();
            state.set(kind, true);
            state.valid = false;
            assert_eq!(state.any_failure(), kind != ValidityKind::Invalid, "{kind}");
        }
    }

    #[test]
    fn test_extract_pairs_kind_with_message() {
        let control = Control::input("email", InputType::Email)
            .value("nope")
            .build()
            .unwrap();
        let error = extract(&control).unwrap();
        assert_eq!(error.kind, ValidityKind::TypeMismatch);
        assert_eq!(error.message, "Please enter an email address.");
    }

    #[test]
    fn test_extract_type_mismatch_over_custom_error() {
        let mut control = Control::input("email", InputType::Email)
            .value("nope")
            .build()
            .unwrap();
        control.set_custom_validity("already registered");
        let error = extract(&control).unwrap();
        assert_eq!(error.kind, ValidityKind::TypeMismatch);
    }

    #[test]
    fn test_extract_custom_error() {
        let mut control = Control::text("user").value("root").build().unwrap();
        assert_eq!(extract(&control), None);

        control.set_custom_validity("reserved name");
        let error = extract(&control).unwrap();
        assert_eq!(error.kind, ValidityKind::CustomError);
        assert_eq!(error.message, "reserved name");
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_string(&ValidityKind::PatternMismatch).unwrap();
        assert_eq!(json, "\"patternMismatch\"");
    }
}
