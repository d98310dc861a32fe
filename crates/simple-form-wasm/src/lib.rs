//! simple-form WASM
//!
//! WebAssembly bindings for the simple-form engine. A browser host describes
//! its controls as plain objects, forwards input and submit events, and gets
//! snapshots back as JavaScript objects.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use simple_form::{
    Control, ControlKind, FilterScope, Form, FormConfig, FormSession, FormSnapshot, SubmitOutcome,
    ValidatorId,
};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// One control as described by JavaScript
///
/// # Example (JavaScript)
/// ```javascript
/// { name: 'age', tag: 'input', type: 'number', min: 18, required: true }
/// ```
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ControlDescriptor {
    #[serde(default)]
    pub name: String,
    /// Element tag, `input` when omitted
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default, rename = "type")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,

    /// Excluded from snapshots (the `data-simple-form-ignore` marker)
    #[serde(default)]
    pub ignore: bool,
}

impl ControlDescriptor {
    pub fn into_control(self) -> Result<Control, String> {
        let tag = self.tag.as_deref().unwrap_or("input");
        let kind = ControlKind::from_tag(tag, self.input_type.as_deref())
            .ok_or_else(|| format!("Unsupported control tag '{}'", tag))?;

        let mut builder = Control::builder(self.name, kind).value(self.value);
        if self.required {
            builder = builder.required();
        }
        if let Some(min) = self.min_length {
            builder = builder.min_length(min);
        }
        if let Some(max) = self.max_length {
            builder = builder.max_length(max);
        }
        if let Some(pattern) = self.pattern {
            builder = builder.pattern(pattern);
        }
        if let Some(min) = self.min {
            builder = builder.min(min);
        }
        if let Some(max) = self.max {
            builder = builder.max(max);
        }
        if let Some(step) = self.step {
            builder = builder.step(step);
        }
        builder.build().map_err(|e| e.to_string())
    }
}

/// Tracking options as passed from JavaScript
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    #[serde(default)]
    pub scope: Option<FilterScope>,
    #[serde(default)]
    pub clear_touched_on_accept: Option<bool>,
    #[serde(default)]
    pub reset_on_accept: Option<bool>,
}

impl From<FormOptions> for FormConfig {
    fn from(options: FormOptions) -> Self {
        let defaults = FormConfig::default();
        FormConfig {
            scope: options.scope.unwrap_or(defaults.scope),
            clear_touched_on_accept: options
                .clear_touched_on_accept
                .unwrap_or(defaults.clear_touched_on_accept),
            reset_on_accept: options.reset_on_accept.unwrap_or(defaults.reset_on_accept),
        }
    }
}

/// Builds a form from descriptors, keeping their order
pub fn build_form(name: &str, descriptors: Vec<ControlDescriptor>) -> Result<Form, String> {
    let mut form = Form::new(name);
    for descriptor in descriptors {
        let ignore = descriptor.ignore;
        let control = descriptor.into_control()?;
        if ignore {
            form.add_ignored(control);
        } else {
            form.add(control);
        }
    }
    Ok(form)
}

/// Result of `submit()` as seen by JavaScript
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SubmitResult<'a> {
    accepted: bool,
    /// Name of the control to focus
    first_invalid: Option<&'a str>,
    snapshot: &'a FormSnapshot,
}

#[derive(Debug)]
enum Event {
    Input { name: String, value: String },
    Submit,
    Reset,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {}", e)))
}

fn busy() -> JsValue {
    JsValue::from_str("Form is handling another event")
}

/// A tracked form
///
/// Events raised from inside a validator or snapshot listener are queued and
/// handled, in order, once the current event is done. Their return value is
/// `undefined`; the queued results reach the host through `onSnapshot`.
///
/// # Example (JavaScript)
/// ```javascript
/// const form = new SimpleForm('signup', [
///     { name: 'password', type: 'password', minLength: 8 },
///     { name: 'confirm', type: 'password' },
/// ]);
/// form.customValidator('confirm', (value, values) =>
///     value === values.password ? null : 'Passwords do not match');
/// const snapshot = form.input('confirm', 'hunter2');
/// ```
#[wasm_bindgen]
pub struct SimpleForm {
    session: RefCell<FormSession>,
    pending: RefCell<VecDeque<Event>>,
    /// First exception thrown by a JavaScript callback during the current event
    thrown: Rc<RefCell<Option<JsValue>>>,
}

#[wasm_bindgen]
impl SimpleForm {
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, controls: JsValue, options: JsValue) -> Result<SimpleForm, JsValue> {
        let descriptors: Vec<ControlDescriptor> = serde_wasm_bindgen::from_value(controls)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse controls: {}", e)))?;

        let config = if options.is_undefined() || options.is_null() {
            FormConfig::default()
        } else {
            let options: FormOptions = serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?;
            options.into()
        };

        let form = build_form(name, descriptors).map_err(|e| JsValue::from_str(&e))?;
        Ok(SimpleForm {
            session: RefCell::new(FormSession::attach(form, config)),
            pending: RefCell::new(VecDeque::new()),
            thrown: Rc::new(RefCell::new(None)),
        })
    }

    /// Input event on the first control named `name`; returns the snapshot,
    /// or `null` when the control is ignored
    pub fn input(&self, name: String, value: String) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Input { name, value })
    }

    /// Submit attempt; returns `{ accepted, firstInvalid, snapshot }`
    pub fn submit(&self) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Submit)
    }

    pub fn reset(&self) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Reset)
    }

    /// Current snapshot without running validators
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let session = self.session.try_borrow().map_err(|_| busy())?;
        to_js(&session.snapshot())
    }

    /// Registers `callback(value, values, name)` for the control named `name`
    ///
    /// A non-empty string return becomes the control's custom error. Returns
    /// an id for `removeValidator`.
    #[wasm_bindgen(js_name = customValidator)]
    pub fn custom_validator(&self, name: &str, callback: js_sys::Function) -> Result<f64, JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
        let id = session
            .form()
            .find(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown control '{}'", name)))?;

        let thrown = Rc::clone(&self.thrown);
        let id = session
            .register_validator(id, move |control, values| {
                let values = match to_js(values) {
                    Ok(values) => values,
                    Err(e) => {
                        thrown.borrow_mut().get_or_insert(e);
                        return None;
                    }
                };
                let result = callback.call3(
                    &JsValue::NULL,
                    &JsValue::from_str(control.value()),
                    &values,
                    &JsValue::from_str(control.name()),
                );
                match result {
                    Ok(message) => message.as_string(),
                    Err(e) => {
                        thrown.borrow_mut().get_or_insert(e);
                        None
                    }
                }
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(id.get() as f64)
    }

    #[wasm_bindgen(js_name = removeValidator)]
    pub fn remove_validator(&self, id: f64) -> Result<bool, JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
        Ok(session.remove_validator(ValidatorId::from_raw(id as u64)))
    }

    /// Toggles the ignore marker on every control named `name`
    #[wasm_bindgen(js_name = setIgnored)]
    pub fn set_ignored(&self, name: &str, ignored: bool) -> Result<(), JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
        let ids: Vec<_> = session
            .form()
            .entries()
            .iter()
            .filter(|e| e.control().name() == name)
            .map(|e| e.id())
            .collect();
        if ids.is_empty() {
            return Err(JsValue::from_str(&format!("Unknown control '{}'", name)));
        }
        for id in ids {
            session
                .set_ignored(id, ignored)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }
        Ok(())
    }

    /// Calls `listener(snapshot)` for every published snapshot
    #[wasm_bindgen(js_name = onSnapshot)]
    pub fn on_snapshot(&self, listener: js_sys::Function) -> Result<(), JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
        let thrown = Rc::clone(&self.thrown);
        session.on_snapshot(move |snapshot| {
            let result = to_js(snapshot).and_then(|s| listener.call1(&JsValue::NULL, &s));
            if let Err(e) = result {
                thrown.borrow_mut().get_or_insert(e);
            }
        });
        Ok(())
    }
}

impl SimpleForm {
    fn dispatch(&self, event: Event) -> Result<JsValue, JsValue> {
        let Ok(mut session) = self.session.try_borrow_mut() else {
            self.pending.borrow_mut().push_back(event);
            return Ok(JsValue::UNDEFINED);
        };

        let mut result = Self::handle(&mut session, event);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(next) = next else { break };
            if let Err(e) = Self::handle(&mut session, next) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        drop(session);

        if let Some(e) = self.thrown.borrow_mut().take() {
            return Err(e);
        }
        result
    }

    fn handle(session: &mut FormSession, event: Event) -> Result<JsValue, JsValue> {
        match event {
            Event::Input { name, value } => {
                let id = session
                    .form()
                    .find(&name)
                    .ok_or_else(|| JsValue::from_str(&format!("Unknown control '{}'", name)))?;
                let snapshot = session
                    .input(id, value)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                match snapshot {
                    Some(snapshot) => to_js(&snapshot),
                    None => Ok(JsValue::NULL),
                }
            }
            Event::Submit => {
                let outcome = session.submit();
                let first_invalid = match &outcome {
                    SubmitOutcome::Rejected { first_invalid, .. } => {
                        session.form().get(*first_invalid).map(Control::name)
                    }
                    SubmitOutcome::Accepted { .. } => None,
                };
                to_js(&SubmitResult {
                    accepted: outcome.is_accepted(),
                    first_invalid,
                    snapshot: outcome.snapshot(),
                })
            }
            Event::Reset => to_js(&session.reset()),
        }
    }
}
