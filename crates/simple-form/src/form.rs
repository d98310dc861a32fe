// File: src/form.rs
// Purpose: The form container: ordered controls plus their tracking flags

use std::collections::BTreeMap;

use crate::control::{Control, ControlFlags, ControlId};
use crate::error::{FormError, Result};
use crate::filter::{self, FilterScope};

/// Current values of participating controls, keyed by name
pub type FormValues = BTreeMap<String, String>;

/// A control together with the flags the form keeps for it
#[derive(Debug, Clone, PartialEq)]
pub struct FormEntry {
    id: ControlId,
    control: Control,
    flags: ControlFlags,
}

impl FormEntry {
    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    pub(crate) fn flags_mut(&mut self) -> &mut ControlFlags {
        &mut self.flags
    }
}

/// An ordered collection of controls
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    name: String,
    entries: Vec<FormEntry>,
    next_id: u64,
}

impl Default for Form {
    fn default() -> Self {
        Self::new("form")
    }
}

impl Form {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a control at the end of the form order
    pub fn add(&mut self, control: Control) -> ControlId {
        let id = ControlId(self.next_id);
        self.next_id += 1;
        self.entries.push(FormEntry {
            id,
            control,
            flags: ControlFlags::default(),
        });
        id
    }

    /// Appends a control that is excluded from tracking
    pub fn add_ignored(&mut self, control: Control) -> ControlId {
        let id = self.add(control);
        if let Some(entry) = self.entries.last_mut() {
            entry.flags.ignored = true;
        }
        id
    }

    pub fn remove(&mut self, id: ControlId) -> Result<Control> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(FormError::UnknownControl(id))?;
        Ok(self.entries.remove(index).control)
    }

    /// All controls in form order, participating or not
    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [FormEntry] {
        &mut self.entries
    }

    pub fn entry(&self, id: ControlId) -> Option<&FormEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub(crate) fn entry_mut(&mut self, id: ControlId) -> Result<&mut FormEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(FormError::UnknownControl(id))
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.entry(id).map(FormEntry::control)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.control)
    }

    /// First control with the given name, in form order
    pub fn find(&self, name: &str) -> Option<ControlId> {
        self.entries
            .iter()
            .find(|e| e.control.name() == name)
            .map(|e| e.id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.entry(id).is_some()
    }

    pub fn flags(&self, id: ControlId) -> Option<ControlFlags> {
        self.entry(id).map(FormEntry::flags)
    }

    pub fn set_value(&mut self, id: ControlId, value: impl Into<String>) -> Result<()> {
        self.entry_mut(id)?.control.set_value(value);
        Ok(())
    }

    pub fn set_ignored(&mut self, id: ControlId, ignored: bool) -> Result<()> {
        self.entry_mut(id)?.flags.ignored = ignored;
        Ok(())
    }

    /// Values of every participating control; later duplicates win
    pub fn values(&self) -> FormValues {
        filter::participating(self, FilterScope::All)
            .into_iter()
            .map(|e| (e.control.name().to_string(), e.control.value().to_string()))
            .collect()
    }

    /// Whole-form validity, as a submit would check it
    ///
    /// Covers every control that takes part in constraint validation,
    /// ignored and unnamed ones included.
    pub fn check_validity(&self) -> bool {
        self.first_invalid().is_none()
    }

    /// First invalid control in form order
    pub fn first_invalid(&self) -> Option<ControlId> {
        self.entries
            .iter()
            .find(|e| e.control.will_validate() && !e.control.check_validity())
            .map(|e| e.id)
    }

    /// Restores initial values, clears touched flags and custom errors
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.control.reset();
            entry.flags.touched = false;
        }
    }
}
