//! # simple-form
//!
//! Form state without the bookkeeping: give it a form's controls and it derives
//! one consistent snapshot of values, touched controls, valid controls and the
//! single ranked error of every invalid one. Custom validators sit on top of
//! native constraint validation.
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_form::{Control, Form, FormConfig, FormSession, InputType};
//!
//! let mut form = Form::new("signup");
//! let email = form.add(Control::input("email", InputType::Email).required().build()?);
//! let password = form.add(Control::input("password", InputType::Password).min_length(8).build()?);
//! let confirm = form.add(Control::input("confirm", InputType::Password).build()?);
//!
//! let mut session = FormSession::attach(form, FormConfig::default());
//! session.register_validator(confirm, |control, values| {
//!     (values.get("password").map(String::as_str) != Some(control.value()))
//!         .then(|| "Passwords do not match".to_string())
//! })?;
//!
//! session.input(password, "correct horse")?;
//! let snapshot = session.input(confirm, "correct hose")?.expect("tracked control");
//! assert_eq!(snapshot.error("confirm").unwrap().message, "Passwords do not match");
//!
//! // Submit marks everything touched, so the untouched email error shows up too
//! let outcome = session.submit();
//! assert!(!outcome.is_accepted());
//! assert!(outcome.snapshot().is_touched("email"));
//! # let _ = email;
//! # Ok::<(), simple_form::FormError>(())
//! ```
//!
//! ## Pipeline
//!
//! Every interaction event runs, in order:
//!
//! 1. the **custom validator registry** ([`ValidatorRegistry`]), which may set custom errors,
//! 2. the **touched tracker** ([`touched`]), which flags the target control,
//! 3. the **snapshot builder** ([`snapshot::build`]), which reads participating
//!    controls ([`filter`]) and ranks their validity ([`validity`]).

pub mod config;
pub mod constraints;
pub mod control;
pub mod error;
pub mod filter;
pub mod form;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod submit;
pub mod touched;
pub mod validity;

pub use config::FormConfig;
pub use constraints::Constraints;
pub use control::{Control, ControlBuilder, ControlFlags, ControlId, ControlKind, InputType};
pub use error::{FormError, Result};
pub use filter::FilterScope;
pub use form::{Form, FormEntry, FormValues};
pub use registry::{ValidatorFn, ValidatorId, ValidatorRegistry};
pub use session::{FormSession, SnapshotListener};
pub use snapshot::{FormSnapshot, SnapshotState};
pub use submit::{SubmitOutcome, SubmitPhase};
pub use validity::{ValidityError, ValidityKind, ValidityState};
pub use simple_form_validation::Pattern;
