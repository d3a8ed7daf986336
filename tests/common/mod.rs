//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use formflow::config::{ServerConfig, ValidationConfig};
use formflow::form::{AsyncValidator, FieldValidators, Form, FormOptions};
use formflow::person::{Person, PersonField, PersonForm, SimulatedServer};
use parking_lot::Mutex;

pub const DEBOUNCE: Duration = Duration::from_millis(500);
pub const ASYNC_DELAY: Duration = Duration::from_millis(1000);

pub const NAME_TAKEN: &str = "Server response: This name is already taken.";
pub const ERROR_NOT_ALLOWED: &str = "No \"error\" allowed in first name";

/// Person form wired to the default simulated server.
pub fn person_form() -> PersonForm {
    person_form_with(ValidationConfig::default(), ServerConfig::default())
}

pub fn person_form_with(validation: ValidationConfig, server: ServerConfig) -> PersonForm {
    PersonForm::new(&validation, Arc::new(SimulatedServer::new(&server)))
}

/// Async validator that records every value it was asked about.
#[derive(Clone, Default)]
pub struct RecordingValidator {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingValidator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl AsyncValidator for RecordingValidator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn validate(&self, value: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(value.to_string());
        tokio::time::sleep(ASYNC_DELAY).await;
        value.contains("error").then(|| "rejected".to_string())
    }
}

/// Async validator that panics instead of answering.
pub struct PanickingValidator;

#[async_trait]
impl AsyncValidator for PanickingValidator {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn validate(&self, value: &str) -> Option<String> {
        tokio::time::sleep(ASYNC_DELAY).await;
        panic!("validator blew up on {value:?}");
    }
}

/// Bare person form whose first name only has `validator` attached.
pub fn recording_form(validator: RecordingValidator) -> Form<Person> {
    async_form(validator)
}

pub fn async_form(validator: impl AsyncValidator + 'static) -> Form<Person> {
    let validators = FieldValidators::new()
        .on_change_async(validator)
        .async_debounce(DEBOUNCE);
    Form::new(FormOptions::new(Person::default()).field(PersonField::FirstName, validators))
}

/// Advance the paused clock by `ms` milliseconds.
pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
