// File: src/session.rs
// Purpose: Scoped form tracking: dispatch interaction events, publish snapshots

use crate::config::FormConfig;
use crate::control::{Control, ControlId};
use crate::error::{FormError, Result};
use crate::filter;
use crate::form::{Form, FormValues};
use crate::registry::{ValidatorId, ValidatorRegistry};
use crate::snapshot::{self, FormSnapshot};
use crate::submit::{SubmitMachine, SubmitOutcome, SubmitPhase};
use crate::touched;

/// Receives every snapshot the session publishes
pub type SnapshotListener = Box<dyn FnMut(&FormSnapshot)>;

/// Live tracking of one form
///
/// Acquired with [`attach`](Self::attach) and given back with
/// [`release`](Self::release). Owns the form's custom validator registry.
/// Callbacks only ever see shared references, so none of them can feed a new
/// event into the session while one is being handled.
pub struct FormSession {
    form: Form,
    registry: ValidatorRegistry,
    config: FormConfig,
    submit: SubmitMachine,
    listener: Option<SnapshotListener>,
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("form", &self.form.name())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("submit", &self.submit.phase())
            .finish()
    }
}

impl FormSession {
    pub fn attach(form: Form, config: FormConfig) -> Self {
        tracing::debug!(form = %form.name(), controls = form.entries().len(), "form tracking attached");
        let registry = ValidatorRegistry::new(form.name());
        Self {
            form,
            registry,
            config,
            submit: SubmitMachine::default(),
            listener: None,
        }
    }

    /// Stops tracking and hands the form back
    pub fn release(self) -> Form {
        tracing::debug!(form = %self.form.name(), "form tracking released");
        self.form
    }

    /// Replaces the snapshot listener
    pub fn on_snapshot<F>(&mut self, listener: F)
    where
        F: FnMut(&FormSnapshot) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn submit_phase(&self) -> SubmitPhase {
        self.submit.phase()
    }

    pub fn register_validator<F>(&mut self, control: ControlId, callback: F) -> Result<ValidatorId>
    where
        F: Fn(&Control, &FormValues) -> Option<String> + 'static,
    {
        if !self.form.contains(control) {
            return Err(FormError::UnknownControl(control));
        }
        Ok(self.registry.register(control, callback))
    }

    pub fn remove_validator(&mut self, id: ValidatorId) -> bool {
        self.registry.remove(id)
    }

    pub fn add_control(&mut self, control: Control) -> ControlId {
        self.form.add(control)
    }

    /// Removes a control along with every validator targeting it
    pub fn remove_control(&mut self, id: ControlId) -> Result<Control> {
        let control = self.form.remove(id)?;
        let dropped = self.registry.remove_for(id);
        tracing::debug!(form = %self.form.name(), control = %id, validators = dropped, "control removed");
        Ok(control)
    }

    pub fn set_ignored(&mut self, id: ControlId, ignored: bool) -> Result<()> {
        self.form.set_ignored(id, ignored)
    }

    /// Handles an input event on `id` carrying its new value
    ///
    /// Validators run first, then the target is marked touched, then the
    /// snapshot is rebuilt and published. Input on an ignored control only
    /// updates its value and yields `None`.
    pub fn input(&mut self, id: ControlId, value: impl Into<String>) -> Result<Option<FormSnapshot>> {
        self.form.set_value(id, value)?;

        let ignored = self.form.flags(id).map(|f| f.ignored).unwrap_or(false);
        if ignored {
            tracing::trace!(form = %self.form.name(), control = %id, "input on ignored control");
            return Ok(None);
        }

        tracing::debug!(form = %self.form.name(), control = %id, "input");
        self.registry.run_all(&mut self.form);
        touched::mark_touched(&mut self.form, id)?;

        let snapshot = self.snapshot();
        self.publish(&snapshot);
        Ok(Some(snapshot))
    }

    /// Handles a submit attempt
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.submit.attempt(&mut self.form, &self.registry, &self.config);
        match &outcome {
            SubmitOutcome::Accepted { .. } => {
                tracing::debug!(form = %self.form.name(), "submit accepted");
            }
            SubmitOutcome::Rejected { first_invalid, .. } => {
                tracing::debug!(form = %self.form.name(), first_invalid = %first_invalid, "submit rejected");
            }
        }
        self.publish(outcome.snapshot());
        outcome
    }

    /// Restores initial values and clears touched state
    pub fn reset(&mut self) -> FormSnapshot {
        tracing::debug!(form = %self.form.name(), "reset");
        self.form.reset();
        self.registry.run_all(&mut self.form);
        let snapshot = self.snapshot();
        self.publish(&snapshot);
        snapshot
    }

    /// Current snapshot, without running validators or publishing
    pub fn snapshot(&self) -> FormSnapshot {
        snapshot::build(&self.form, self.config.scope)
    }

    /// Values of every participating control
    pub fn values(&self) -> FormValues {
        self.form.values()
    }

    /// Participating controls, honoring the configured scope
    pub fn participating(&self) -> Vec<ControlId> {
        filter::participating(&self.form, self.config.scope)
            .into_iter()
            .map(|e| e.id())
            .collect()
    }

    fn publish(&mut self, snapshot: &FormSnapshot) {
        if let Some(listener) = self.listener.as_mut() {
            listener(snapshot);
        }
    }
}
