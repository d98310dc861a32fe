// File: src/registry.rs
// Purpose: Caller-supplied validators that can inject custom error messages

use std::fmt;

use crate::control::{Control, ControlId};
use crate::form::{Form, FormValues};

/// Validator callback: `Some(message)` marks the control invalid
pub type ValidatorFn = Box<dyn Fn(&Control, &FormValues) -> Option<String>>;

/// Handle for removing a registered validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatorId(u64);

impl ValidatorId {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

struct RegisteredValidator {
    id: ValidatorId,
    control: ControlId,
    callback: ValidatorFn,
}

/// Custom validators of one form, run in registration order
pub struct ValidatorRegistry {
    form: String,
    validators: Vec<RegisteredValidator>,
    next_id: u64,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets: Vec<ControlId> = self.validators.iter().map(|v| v.control).collect();
        f.debug_struct("ValidatorRegistry")
            .field("form", &self.form)
            .field("targets", &targets)
            .finish()
    }
}

impl ValidatorRegistry {
    pub fn new(form: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            validators: Vec::new(),
            next_id: 0,
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn register<F>(&mut self, control: ControlId, callback: F) -> ValidatorId
    where
        F: Fn(&Control, &FormValues) -> Option<String> + 'static,
    {
        let id = ValidatorId(self.next_id);
        self.next_id += 1;
        self.validators.push(RegisteredValidator {
            id,
            control,
            callback: Box::new(callback),
        });
        tracing::debug!(form = %self.form, control = %control, validator = id.0, "validator registered");
        id
    }

    /// Returns `false` if the validator was already gone
    pub fn remove(&mut self, id: ValidatorId) -> bool {
        let before = self.validators.len();
        self.validators.retain(|v| v.id != id);
        before != self.validators.len()
    }

    /// Drops every validator targeting `control`; returns how many
    pub fn remove_for(&mut self, control: ControlId) -> usize {
        let before = self.validators.len();
        self.validators.retain(|v| v.control != control);
        before - self.validators.len()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs every validator against the current form values
    ///
    /// Each target's custom error is cleared, then set to the callback's
    /// message only if the control has no native message of its own.
    pub fn run_all(&self, form: &mut Form) {
        if self.validators.is_empty() {
            return;
        }
        let values = form.values();

        for validator in &self.validators {
            let Some(control) = form.get_mut(validator.control) else {
                tracing::warn!(
                    form = %self.form,
                    control = %validator.control,
                    "skipping validator for a control that no longer exists"
                );
                continue;
            };

            control.set_custom_validity("");
            let outcome = (validator.callback)(control, &values).filter(|m| !m.is_empty());
            tracing::trace!(control = %validator.control, outcome = ?outcome, "validator ran");

            if let Some(message) = outcome {
                if control.validation_message().is_empty() {
                    control.set_custom_validity(message);
                } else {
                    tracing::trace!(control = %validator.control, "native message takes precedence");
                }
            }
        }
    }
}
