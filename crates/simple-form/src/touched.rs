// File: src/touched.rs
// Purpose: Track which controls have received user interaction

use crate::control::ControlId;
use crate::error::Result;
use crate::filter;
use crate::form::{Form, FormEntry};

/// Flags one control as touched
///
/// Returns `true` if the flag changed; marking twice is a no-op.
pub fn mark_touched(form: &mut Form, id: ControlId) -> Result<bool> {
    let flags = form.entry_mut(id)?.flags_mut();
    let changed = !flags.touched;
    flags.touched = true;
    Ok(changed)
}

/// Flags every participating control, ahead of a submit attempt
pub fn mark_all_touched(form: &mut Form) {
    set_all(form, true);
}

/// Clears the flag on every participating control
pub fn clear_all_touched(form: &mut Form) {
    set_all(form, false);
}

fn set_all(form: &mut Form, touched: bool) {
    for entry in form.entries_mut() {
        if filter::is_participating(entry) {
            entry.flags_mut().touched = touched;
        }
    }
}

pub fn is_touched(entry: &FormEntry) -> bool {
    entry.flags().touched
}

/// Names of the touched controls among `entries`, in order
pub fn touched_names<'a>(entries: &[&'a FormEntry]) -> Vec<&'a str> {
    entries
        .iter()
        .filter(|e| is_touched(e))
        .map(|e| e.control().name())
        .collect()
}
