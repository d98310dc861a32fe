// File: src/filter.rs
// Purpose: Decide which controls take part in state tracking

use serde::{Deserialize, Serialize};

use crate::form::{Form, FormEntry};

/// Which participating controls a pass looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    /// Every participating control
    #[default]
    All,
    /// Only participating controls already touched
    Touched,
}

/// A named, non-ignored data control
pub fn is_participating(entry: &FormEntry) -> bool {
    let control = entry.control();
    control.kind().is_data_control() && !control.name().is_empty() && !entry.flags().ignored
}

/// Participating controls in form order
pub fn participating(form: &Form, scope: FilterScope) -> Vec<&FormEntry> {
    form.entries()
        .iter()
        .filter(|e| is_participating(e))
        .filter(|e| scope == FilterScope::All || e.flags().touched)
        .collect()
}
