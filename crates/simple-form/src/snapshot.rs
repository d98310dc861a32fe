// File: src/snapshot.rs
// Purpose: Compose filter, touched tracking and validity into one form snapshot

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::filter::{self, FilterScope};
use crate::form::{Form, FormValues};
use crate::touched;
use crate::validity::{self, ValidityError};

/// Form-wide flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SnapshotState {
    /// Any control touched
    pub touched: bool,
    /// Every control valid
    pub valid: bool,
}

/// Immutable view of a form at one point in time
///
/// Every name in `values` sits in exactly one of `valid` and `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormSnapshot {
    pub values: FormValues,
    pub touched: BTreeSet<String>,
    pub valid: BTreeSet<String>,
    pub errors: BTreeMap<String, ValidityError>,
    pub state: SnapshotState,
}

impl FormSnapshot {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn error(&self, name: &str) -> Option<&ValidityError> {
        self.errors.get(name)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.valid.contains(name)
    }
}

/// Derives the snapshot from the form as it stands
///
/// Does not validate; custom validators must already have run. When several
/// controls share a name, any invalid one makes the name invalid and the
/// first such control supplies the error.
pub fn build(form: &Form, scope: FilterScope) -> FormSnapshot {
    let entries = filter::participating(form, scope);
    let mut snapshot = FormSnapshot::default();

    for name in touched::touched_names(&entries) {
        snapshot.touched.insert(name.to_string());
    }

    for entry in &entries {
        let control = entry.control();
        let name = control.name();
        snapshot
            .values
            .insert(name.to_string(), control.value().to_string());

        match validity::extract(control) {
            None => {
                if !snapshot.errors.contains_key(name) {
                    snapshot.valid.insert(name.to_string());
                }
            }
            Some(error) => {
                snapshot.valid.remove(name);
                snapshot.errors.entry(name.to_string()).or_insert(error);
            }
        }
    }

    snapshot.state = SnapshotState {
        touched: !snapshot.touched.is_empty(),
        valid: snapshot.valid.len() == snapshot.values.len(),
    };
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Control, InputType};
    use crate::touched::mark_touched;
    use crate::validity::ValidityKind;
    use pretty_assertions::assert_eq;

    fn signup() -> Form {
        let mut form = Form::new("signup");
        form.add(
            Control::input("email", InputType::Email)
                .value("ada@example.com")
                .required()
                .build()
                .unwrap(),
        );
        form.add(Control::text("name").required().build().unwrap());
        form.add_ignored(Control::text("search").required().build().unwrap());
        form
    }

    #[test]
    fn test_build_partitions_valid_and_errors() {
        let snapshot = build(&signup(), FilterScope::All);

        assert_eq!(snapshot.values.len(), 2);
        assert!(snapshot.is_valid("email"));
        assert_eq!(snapshot.error("name").unwrap().kind, ValidityKind::ValueMissing);
        assert!(!snapshot.values.contains_key("search"));
        assert!(snapshot.error("search").is_none());
        assert_eq!(
            snapshot.state,
            SnapshotState {
                touched: false,
                valid: false
            }
        );
    }

    #[test]
    fn test_touched_scope_limits_snapshot() {
        let mut form = signup();
        let email = form.find("email").unwrap();
        mark_touched(&mut form, email).unwrap();

        let snapshot = build(&form, FilterScope::Touched);
        assert_eq!(snapshot.values.keys().collect::<Vec<_>>(), ["email"]);
        assert!(snapshot.state.valid);
        assert!(snapshot.state.touched);
    }

    #[test]
    fn test_duplicate_name_with_one_invalid() {
        let mut form = Form::default();
        form.add(Control::text("tag").value("ok").build().unwrap());
        form.add(Control::text("tag").max_length(1).value("too long").build().unwrap());
        form.add(Control::text("tag").value("fine").build().unwrap());

        let snapshot = build(&form, FilterScope::All);
        assert!(!snapshot.is_valid("tag"));
        assert_eq!(snapshot.error("tag").unwrap().kind, ValidityKind::TooLong);
        assert!(!snapshot.state.valid);
    }

    #[test]
    fn test_empty_form_is_valid_and_untouched() {
        let snapshot = build(&Form::default(), FilterScope::All);
        assert!(snapshot.state.valid);
        assert!(!snapshot.state.touched);
    }

    #[test]
    fn test_serialized_shape() {
        let snapshot = build(&signup(), FilterScope::All);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["errors"]["name"]["kind"], "valueMissing");
        assert_eq!(json["errors"]["name"]["message"], "Please fill out this field.");
        assert_eq!(json["values"]["email"], "ada@example.com");
        assert_eq!(json["state"]["valid"], false);
        assert_eq!(json["valid"][0], "email");
    }
}
