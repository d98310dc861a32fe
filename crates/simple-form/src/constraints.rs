// File: src/constraints.rs
// Purpose: Native constraint evaluation (the host's built-in validation)

use simple_form_validation::{
    self as checks, Pattern, VALUE_MISSING, VALUE_MISSING_SELECT,
};

use crate::control::{Control, ControlKind, InputType};
use crate::validity::{ValidityKind, ValidityState};

/// HTML-style constraints attached to a control
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

/// Outcome of the native checks, before any custom error is applied
#[derive(Debug, Clone, Default)]
pub(crate) struct NativeReport {
    pub state: ValidityState,
    /// Message of the highest-ranked native failure
    pub message: Option<String>,
}

impl NativeReport {
    fn fail(&mut self, kind: ValidityKind, message: String) {
        self.state.set(kind, true);
        if self.state.first_failure_before(kind).is_none() {
            self.message = Some(message);
        }
    }
}

/// Runs every native constraint that applies to the control's kind
pub(crate) fn evaluate(control: &Control) -> NativeReport {
    let mut report = NativeReport::default();
    let value = control.value();
    let c = control.constraints();
    let kind = control.kind();

    if c.required && value.is_empty() {
        let message = if kind == ControlKind::Select {
            VALUE_MISSING_SELECT
        } else {
            VALUE_MISSING
        };
        report.fail(ValidityKind::ValueMissing, message.to_string());
    }

    if value.is_empty() {
        report.state.valid = !report.state.any_failure();
        return report;
    }

    let textual = match kind {
        ControlKind::Input(t) => t.is_textual(),
        ControlKind::TextArea => true,
        _ => false,
    };

    match kind.input_type() {
        Some(InputType::Email) => {
            if let Err(msg) = checks::validate_email(value) {
                report.fail(ValidityKind::TypeMismatch, msg);
            }
        }
        Some(InputType::Url) => {
            if let Err(msg) = checks::validate_url(value) {
                report.fail(ValidityKind::TypeMismatch, msg);
            }
        }
        Some(t) if t.is_numeric() => check_numeric(&mut report, value, c),
        _ => {}
    }

    if textual {
        if let Some(max) = c.max_length {
            if let Err(msg) = checks::validate_max_length(value, max) {
                report.fail(ValidityKind::TooLong, msg);
            }
        }
        if let Some(min) = c.min_length {
            if let Err(msg) = checks::validate_min_length(value, min) {
                report.fail(ValidityKind::TooShort, msg);
            }
        }
    }

    // pattern is an input attribute; text areas ignore it
    if let (Some(pattern), Some(t)) = (&c.pattern, kind.input_type()) {
        if t.is_textual() {
            if let Err(msg) = checks::validate_pattern(value, pattern) {
                report.fail(ValidityKind::PatternMismatch, msg);
            }
        }
    }

    report.state.valid = !report.state.any_failure();
    report
}

fn check_numeric(report: &mut NativeReport, value: &str, c: &Constraints) {
    let Some(number) = checks::parse_number(value) else {
        report.fail(ValidityKind::BadInput, "Please enter a number.".to_string());
        return;
    };

    if let Some(max) = c.max {
        if let Err(msg) = checks::validate_max(number, max) {
            report.fail(ValidityKind::RangeOverflow, msg);
        }
    }
    if let Some(min) = c.min {
        if let Err(msg) = checks::validate_min(number, min) {
            report.fail(ValidityKind::RangeUnderflow, msg);
        }
    }
    if let Some(step) = c.step {
        if let Err(msg) = checks::validate_step(number, step, c.min.unwrap_or(0.0)) {
            report.fail(ValidityKind::StepMismatch, msg);
        }
    }
}
