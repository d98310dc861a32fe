// File: src/control.rs
// Purpose: Form controls, their kinds, and the per-control tracking flags

use std::fmt;

use serde::Serialize;

use crate::constraints::{self, Constraints};
use crate::error::{FormError, Result};
use crate::validity::ValidityState;
use simple_form_validation::Pattern;

/// Stable handle to a control inside a [`Form`](crate::Form)
///
/// Handles are never reused, so a handle to a removed control stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ControlId(pub(crate) u64);

impl ControlId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `type` attribute of an input control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Search,
    Tel,
    Password,
    Email,
    Url,
    Number,
    Range,
    Date,
    Time,
    Color,
    Hidden,
}

impl InputType {
    /// Parse the HTML type string; unknown types fall back to text
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "search" => Self::Search,
            "tel" => Self::Tel,
            "password" => Self::Password,
            "email" => Self::Email,
            "url" => Self::Url,
            "number" => Self::Number,
            "range" => Self::Range,
            "date" => Self::Date,
            "time" => Self::Time,
            "color" => Self::Color,
            "hidden" => Self::Hidden,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Password => "password",
            Self::Email => "email",
            Self::Url => "url",
            Self::Number => "number",
            Self::Range => "range",
            Self::Date => "date",
            Self::Time => "time",
            Self::Color => "color",
            Self::Hidden => "hidden",
        }
    }

    /// Types that honor `minlength`, `maxlength` and `pattern`
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Search | Self::Tel | Self::Password | Self::Email | Self::Url
        )
    }

    /// Types that honor `min`, `max` and `step`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }
}

/// What sort of form-associated element a control is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", content = "type", rename_all = "lowercase")]
pub enum ControlKind {
    Input(InputType),
    Select,
    TextArea,
    Button,
    Fieldset,
    Output,
}

impl ControlKind {
    /// Resolve an element tag name (plus the input `type`, if any)
    pub fn from_tag(tag: &str, input_type: Option<&str>) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "input" => Some(Self::Input(input_type.map(InputType::parse).unwrap_or_default())),
            "select" => Some(Self::Select),
            "textarea" => Some(Self::TextArea),
            "button" => Some(Self::Button),
            "fieldset" => Some(Self::Fieldset),
            "output" => Some(Self::Output),
            _ => None,
        }
    }

    /// Inputs, selects and text areas carry form data; the rest never participate
    pub fn is_data_control(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Select | Self::TextArea)
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self {
            Self::Input(t) => Some(*t),
            _ => None,
        }
    }
}

/// Tracking markers kept by the form for each control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ControlFlags {
    /// Interacted with since the last reset
    pub touched: bool,
    /// Excluded from all tracking
    pub ignored: bool,
}

/// A named, valued form control
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    name: String,
    kind: ControlKind,
    value: String,
    default_value: String,
    constraints: Constraints,
    custom_validity: String,
}

impl Control {
    pub fn builder(name: impl Into<String>, kind: ControlKind) -> ControlBuilder {
        ControlBuilder {
            name: name.into(),
            kind,
            value: String::new(),
            constraints: Constraints::default(),
            pattern: None,
        }
    }

    pub fn input(name: impl Into<String>, input_type: InputType) -> ControlBuilder {
        Self::builder(name, ControlKind::Input(input_type))
    }

    pub fn text(name: impl Into<String>) -> ControlBuilder {
        Self::input(name, InputType::Text)
    }

    pub fn select(name: impl Into<String>) -> ControlBuilder {
        Self::builder(name, ControlKind::Select)
    }

    pub fn text_area(name: impl Into<String>) -> ControlBuilder {
        Self::builder(name, ControlKind::TextArea)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The value a reset restores
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Sets the custom error message; an empty string clears it
    pub fn set_custom_validity(&mut self, message: impl Into<String>) {
        self.custom_validity = message.into();
    }

    pub fn custom_validity(&self) -> &str {
        &self.custom_validity
    }

    /// Whether constraint validation applies at all
    ///
    /// Non-data elements and hidden inputs are barred.
    pub fn will_validate(&self) -> bool {
        self.kind.is_data_control() && self.kind.input_type() != Some(InputType::Hidden)
    }

    /// Current per-category validity, custom error included
    pub fn validity(&self) -> ValidityState {
        if !self.will_validate() {
            return ValidityState::default();
        }
        let mut state = constraints::evaluate(self).state;
        state.custom_error = !self.custom_validity.is_empty();
        state.valid = !state.any_failure();
        state
    }

    /// The message for the current failure, or empty when valid
    ///
    /// Native failures speak first; the custom message shows only when no
    /// native constraint fails.
    pub fn validation_message(&self) -> String {
        if !self.will_validate() {
            return String::new();
        }
        match constraints::evaluate(self).message {
            Some(native) => native,
            None => self.custom_validity.clone(),
        }
    }

    pub fn check_validity(&self) -> bool {
        self.validity().valid
    }

    pub(crate) fn reset(&mut self) {
        self.value = self.default_value.clone();
        self.custom_validity.clear();
    }
}

/// Builder for [`Control`]
#[derive(Debug, Clone)]
pub struct ControlBuilder {
    name: String,
    kind: ControlKind,
    value: String,
    constraints: Constraints,
    pattern: Option<String>,
}

impl ControlBuilder {
    /// Initial value, also restored on reset
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    /// Compiled on [`build`](Self::build)
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.constraints.step = Some(step);
        self
    }

    pub fn build(self) -> Result<Control> {
        let mut constraints = self.constraints;
        if let Some(source) = self.pattern {
            let pattern = Pattern::new(&source).map_err(|source_err| FormError::InvalidPattern {
                pattern: source.clone(),
                source: source_err,
            })?;
            constraints.pattern = Some(pattern);
        }

        Ok(Control {
            name: self.name,
            kind: self.kind,
            default_value: self.value.clone(),
            value: self.value,
            constraints,
            custom_validity: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("email", InputType::Email)]
    #[case("NUMBER", InputType::Number)]
    #[case("hidden", InputType::Hidden)]
    #[case("datetime-local", InputType::Text)]
    #[case("", InputType::Text)]
    fn test_input_type_parse(#[case] raw: &str, #[case] expected: InputType) {
        assert_eq!(InputType::parse(raw), expected);
    }

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(
            ControlKind::from_tag("INPUT", Some("url")),
            Some(ControlKind::Input(InputType::Url))
        );
        assert_eq!(
            ControlKind::from_tag("input", None),
            Some(ControlKind::Input(InputType::Text))
        );
        assert_eq!(ControlKind::from_tag("textarea", None), Some(ControlKind::TextArea));
        assert_eq!(ControlKind::from_tag("div", None), None);
    }

    #[test]
    fn test_data_control_kinds() {
        assert!(ControlKind::Select.is_data_control());
        assert!(ControlKind::Input(InputType::Hidden).is_data_control());
        assert!(!ControlKind::Button.is_data_control());
        assert!(!ControlKind::Fieldset.is_data_control());
    }

    #[test]
    fn test_builder_keeps_default_value() {
        let mut control = Control::text("nickname").value("neo").build().unwrap();
        control.set_value("trinity");
        control.set_custom_validity("taken");
        assert_eq!(control.default_value(), "neo");

        control.reset();
        assert_eq!(control.value(), "neo");
        assert_eq!(control.custom_validity(), "");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = Control::text("zip").pattern("[0-9").build().unwrap_err();
        assert!(matches!(err, FormError::InvalidPattern { ref pattern, .. } if pattern == "[0-9"));
    }

    #[test]
    fn test_custom_message_yields_to_native() {
        let mut control = Control::text("name").required().build().unwrap();
        control.set_custom_validity("custom");
        assert_eq!(control.validation_message(), "Please fill out this field.");

        control.set_value("x");
        assert_eq!(control.validation_message(), "custom");
        assert!(!control.check_validity());
    }

    #[test]
    fn test_hidden_input_is_barred() {
        let mut control = Control::input("token", InputType::Hidden)
            .required()
            .build()
            .unwrap();
        control.set_custom_validity("nope");
        assert!(!control.will_validate());
        assert!(control.check_validity());
        assert_eq!(control.validation_message(), "");
    }
}
