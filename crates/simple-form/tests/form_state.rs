//! End-to-end form state properties, driven through `FormSession`
//!
//! Each test builds a small form, feeds interaction events straight into the
//! session (no UI event loop), and checks the published snapshots.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use simple_form::{
    Control, ControlId, Form, FormConfig, FormSession, FormSnapshot, InputType, SubmitOutcome,
    ValidityKind,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Checks the invariants every snapshot must satisfy
fn assert_consistent(snapshot: &FormSnapshot) {
    for name in snapshot.values.keys() {
        let in_valid = snapshot.valid.contains(name);
        let in_errors = snapshot.errors.contains_key(name);
        assert!(in_valid ^ in_errors, "{name} must be in exactly one of valid/errors");
    }
    assert_eq!(snapshot.valid.len() + snapshot.errors.len(), snapshot.values.len());
    assert_eq!(snapshot.state.valid, snapshot.valid.len() == snapshot.values.len());
    assert!(snapshot.touched.iter().all(|n| snapshot.values.contains_key(n)));
    assert_eq!(snapshot.state.touched, !snapshot.touched.is_empty());
}

struct Signup {
    session: FormSession,
    email: ControlId,
    age: ControlId,
    nickname: ControlId,
    honeypot: ControlId,
}

#[fixture]
fn signup() -> Signup {
    init_tracing();
    let mut form = Form::new("signup");
    let email = form.add(
        Control::input("email", InputType::Email)
            .required()
            .build()
            .unwrap(),
    );
    let age = form.add(
        Control::input("age", InputType::Number)
            .min(18.0)
            .max(120.0)
            .value("30")
            .build()
            .unwrap(),
    );
    let nickname = form.add(
        Control::text("nickname")
            .pattern("[a-z]+")
            .max_length(12)
            .build()
            .unwrap(),
    );
    let honeypot = form.add_ignored(Control::text("website").required().build().unwrap());
    form.add(Control::text("").value("unnamed").build().unwrap());

    Signup {
        session: FormSession::attach(form, FormConfig::default()),
        email,
        age,
        nickname,
        honeypot,
    }
}

#[rstest]
fn partition_and_state_hold_across_events(signup: Signup) {
    let Signup { mut session, email, age, nickname, .. } = signup;

    let events: [(ControlId, &str); 6] = [
        (email, "ada"),
        (email, "ada@example.com"),
        (age, "12"),
        (nickname, "Ada!"),
        (nickname, "ada"),
        (age, "40"),
    ];
    for (id, value) in events {
        let snapshot = session.input(id, value).unwrap().unwrap();
        assert_consistent(&snapshot);
    }

    let last = session.snapshot();
    assert!(last.state.valid);
    assert_eq!(last.touched.len(), 3);
}

#[rstest]
fn ignored_control_never_appears(signup: Signup) {
    let Signup { mut session, email, honeypot, .. } = signup;

    assert_eq!(session.input(honeypot, "spam").unwrap(), None);
    let snapshot = session.input(email, "bad").unwrap().unwrap();

    for snapshot in [snapshot, session.submit().into_snapshot()] {
        assert!(!snapshot.values.contains_key("website"));
        assert!(!snapshot.touched.contains("website"));
        assert!(!snapshot.valid.contains("website"));
        assert!(!snapshot.errors.contains_key("website"));
        assert!(!snapshot.values.contains_key(""));
    }
}

#[rstest]
fn type_mismatch_outranks_custom_error(signup: Signup) {
    let Signup { mut session, email, .. } = signup;
    session
        .register_validator(email, |_, _| Some("Already registered".to_string()))
        .unwrap();

    let snapshot = session.input(email, "not-an-email").unwrap().unwrap();
    let error = snapshot.error("email").unwrap();
    assert_eq!(error.kind, ValidityKind::TypeMismatch);
    assert_eq!(error.message, "Please enter an email address.");

    // once the native problem is gone the custom message surfaces
    let snapshot = session.input(email, "ada@example.com").unwrap().unwrap();
    let error = snapshot.error("email").unwrap();
    assert_eq!(error.kind, ValidityKind::CustomError);
    assert_eq!(error.message, "Already registered");
}

#[test]
fn submit_marks_all_touched_and_blocks_invalid_form() {
    init_tracing();
    let mut form = Form::new("contact");
    let message = form.add(Control::text_area("message").required().build().unwrap());
    let name = form.add(Control::text("name").build().unwrap());
    let mut session = FormSession::attach(form, FormConfig::default());

    let before = session.input(name, "Ada").unwrap().unwrap();
    assert!(before.is_touched("name"));
    assert!(!before.is_touched("message"));

    match session.submit() {
        SubmitOutcome::Rejected { snapshot, first_invalid } => {
            assert_eq!(first_invalid, message);
            assert!(snapshot.is_touched("name"));
            assert!(snapshot.is_touched("message"));
            assert_eq!(snapshot.error("message").unwrap().kind, ValidityKind::ValueMissing);
            assert!(!snapshot.state.valid);
            assert_consistent(&snapshot);
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    // touched flags survive the rejection
    assert!(session.snapshot().is_touched("message"));
}

#[test]
fn successful_submit_clears_touched() {
    init_tracing();
    let mut form = Form::new("contact");
    let name = form.add(Control::text("name").required().build().unwrap());
    let mut session = FormSession::attach(form, FormConfig::default());

    session.input(name, "Ada").unwrap();
    let outcome = session.submit();

    assert!(outcome.is_accepted());
    let snapshot = outcome.snapshot();
    assert!(!snapshot.state.touched);
    assert!(snapshot.touched.is_empty());
    assert_eq!(snapshot.value("name"), Some("Ada"));
    assert!(!session.snapshot().state.touched);
}

#[rstest]
fn marking_touched_twice_changes_nothing(signup: Signup) {
    let Signup { mut session, email, .. } = signup;

    let first = session.input(email, "ada@example.com").unwrap().unwrap();
    let second = session.input(email, "ada@example.com").unwrap().unwrap();
    assert_eq!(first, second);
}

#[test]
fn submit_publishes_exactly_one_snapshot() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut form = Form::default();
    form.add(Control::text("q").required().build().unwrap());
    let mut session = FormSession::attach(form, FormConfig::default());
    let count = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&count);
    session.on_snapshot(move |_| *seen.borrow_mut() += 1);

    session.submit();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn destroyed_control_stops_validating() {
    let mut form = Form::default();
    let code = form.add(Control::text("code").build().unwrap());
    let other = form.add(Control::text("other").build().unwrap());
    let mut session = FormSession::attach(form, FormConfig::default());
    session
        .register_validator(code, |_, _| Some("always wrong".to_string()))
        .unwrap();

    assert!(!session.submit().is_accepted());

    session.remove_control(code).unwrap();
    assert!(session.registry().is_empty());
    let snapshot = session.input(other, "x").unwrap().unwrap();
    assert!(snapshot.state.valid);
}

#[test]
fn snapshot_serializes_for_ui_layer() {
    let mut form = Form::default();
    let email = form.add(Control::input("email", InputType::Email).build().unwrap());
    let mut session = FormSession::attach(form, FormConfig::default());
    let snapshot = session.input(email, "x").unwrap().unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "values": { "email": "x" },
            "touched": ["email"],
            "valid": [],
            "errors": {
                "email": { "kind": "typeMismatch", "message": "Please enter an email address." }
            },
            "state": { "touched": true, "valid": false }
        })
    );
}
