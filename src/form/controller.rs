//! Form controller: owns field state and runs validator side effects.

use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::form::error::SubmitError;
use crate::form::field::{FieldIntent, FieldMeta, FieldReducer, FieldState};
use crate::form::snapshot::{FieldSnapshot, FormSnapshot};
use crate::form::validators::{AsyncValidator, FieldValidators};
use crate::form::values::{FieldKey, FormValues};
use crate::mvi::Reducer;

/// Static setup of a form: default values and per-field validators.
pub struct FormOptions<V: FormValues> {
    defaults: V,
    validators: Vec<(V::Field, FieldValidators)>,
    async_always: bool,
}

impl<V: FormValues> FormOptions<V> {
    pub fn new(defaults: V) -> Self {
        Self {
            defaults,
            validators: Vec::new(),
            async_always: false,
        }
    }

    /// Attach validators to `field`, replacing any registered earlier.
    pub fn field(mut self, field: V::Field, validators: FieldValidators) -> Self {
        self.validators.retain(|(name, _)| *name != field);
        self.validators.push((field, validators));
        self
    }

    /// Run async validators even when the sync validator already failed.
    pub fn async_always(mut self, enabled: bool) -> Self {
        self.async_always = enabled;
        self
    }

    fn validators_for(&self, field: V::Field) -> Option<&FieldValidators> {
        self.validators
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, validators)| validators)
    }
}

struct FieldSlot<F> {
    name: F,
    state: FieldState,
    /// Debounce timer or running validator for the current generation.
    task: Option<AbortHandle>,
}

impl<F> FieldSlot<F> {
    fn reduce(&mut self, intent: FieldIntent) {
        self.state = FieldReducer::reduce(std::mem::take(&mut self.state), intent);
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct FormState<V: FormValues> {
    fields: Vec<FieldSlot<V::Field>>,
    is_submitting: bool,
    is_submitted: bool,
    submission_attempts: u32,
}

impl<V: FormValues> FormState<V> {
    fn new(defaults: &V) -> Self {
        let fields = V::fields()
            .iter()
            .map(|&name| FieldSlot {
                name,
                state: FieldState::new(defaults.value(name)),
                task: None,
            })
            .collect();
        Self {
            fields,
            is_submitting: false,
            is_submitted: false,
            submission_attempts: 0,
        }
    }

    fn slot(&self, field: V::Field) -> Option<&FieldSlot<V::Field>> {
        self.fields.iter().find(|slot| slot.name == field)
    }

    fn slot_mut(&mut self, field: V::Field) -> Option<&mut FieldSlot<V::Field>> {
        self.fields.iter_mut().find(|slot| slot.name == field)
    }

    fn error_count(&self) -> usize {
        self.fields
            .iter()
            .map(|slot| slot.state.meta.error_map.len())
            .sum()
    }

    fn values(&self, defaults: &V) -> V {
        let mut values = defaults.clone();
        for slot in &self.fields {
            values.set_value(slot.name, slot.state.value.clone());
        }
        values
    }

    fn snapshot(&self, defaults: &V) -> FormSnapshot<V> {
        FormSnapshot {
            values: self.values(defaults),
            fields: self
                .fields
                .iter()
                .map(|slot| FieldSnapshot {
                    name: slot.name.name(),
                    value: slot.state.value.clone(),
                    meta: slot.state.meta.clone(),
                })
                .collect(),
            can_submit: self.error_count() == 0,
            is_submitting: self.is_submitting,
            is_submitted: self.is_submitted,
            is_validating: self.fields.iter().any(|slot| slot.state.meta.is_validating),
            is_validation_pending: self.fields.iter().any(|slot| slot.state.validation_pending),
            submission_attempts: self.submission_attempts,
        }
    }
}

struct Shared<V: FormValues> {
    options: FormOptions<V>,
    state: Mutex<FormState<V>>,
    updates: watch::Sender<FormSnapshot<V>>,
}

impl<V: FormValues> Shared<V> {
    /// Publish while still holding the state lock so snapshots go out in
    /// the order the state changed.
    fn publish(&self, state: &FormState<V>) {
        self.updates
            .send_replace(state.snapshot(&self.options.defaults));
    }

    /// Apply an intent produced by the async validator of `generation`.
    ///
    /// Returns false, without touching anything, when the field has moved on
    /// to a newer generation.
    fn dispatch_current(&self, field: V::Field, generation: u64, intent: FieldIntent) -> bool {
        let mut state = self.state.lock();
        let Some(slot) = state.slot_mut(field) else {
            return false;
        };
        if slot.state.generation != generation {
            return false;
        }
        slot.reduce(intent);
        if !slot.state.validation_pending {
            slot.task = None;
        }
        self.publish(&state);
        true
    }

    fn finish_submit(&self) {
        let mut state = self.state.lock();
        state.is_submitting = false;
        self.publish(&state);
    }
}

/// Handle to a mounted form.
///
/// Cheap to clone; every clone drives the same state. Validators are called
/// while the form is locked and must not call back into it.
pub struct Form<V: FormValues> {
    shared: Arc<Shared<V>>,
}

impl<V: FormValues> Clone for Form<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V: FormValues> Form<V> {
    pub fn new(options: FormOptions<V>) -> Self {
        let state = FormState::new(&options.defaults);
        let (updates, _) = watch::channel(state.snapshot(&options.defaults));
        Self {
            shared: Arc::new(Shared {
                options,
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    /// Receive a fresh [`FormSnapshot`] after every state change.
    ///
    /// Do not keep a `borrow()` guard alive while calling into the form.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot<V>> {
        self.shared.updates.subscribe()
    }

    pub fn snapshot(&self) -> FormSnapshot<V> {
        let state = self.shared.state.lock();
        state.snapshot(&self.shared.options.defaults)
    }

    pub fn values(&self) -> V {
        let state = self.shared.state.lock();
        state.values(&self.shared.options.defaults)
    }

    pub fn field_value(&self, field: V::Field) -> Option<String> {
        let state = self.shared.state.lock();
        state.slot(field).map(|slot| slot.state.value.clone())
    }

    pub fn field_meta(&self, field: V::Field) -> Option<FieldMeta> {
        let state = self.shared.state.lock();
        state.slot(field).map(|slot| slot.state.meta.clone())
    }

    /// No field currently holds an error.
    pub fn can_submit(&self) -> bool {
        self.shared.state.lock().error_count() == 0
    }

    pub fn is_submitting(&self) -> bool {
        self.shared.state.lock().is_submitting
    }

    /// Record a new value for `field`.
    ///
    /// The sync validator runs immediately. If the field has an async
    /// validator it is scheduled after the debounce window, replacing
    /// whatever was scheduled or running for the previous value.
    pub fn handle_change(&self, field: V::Field, value: impl Into<String>) {
        let value = value.into();
        let sync_error = self
            .shared
            .options
            .validators_for(field)
            .and_then(|v| v.run_on_change(&value));
        let scheduled = self.async_job(field, sync_error.is_some());

        let mut state = self.shared.state.lock();
        let Some(slot) = state.slot_mut(field) else {
            warn!(field = field.name(), "change for unknown field ignored");
            return;
        };
        slot.cancel_task();
        debug!(
            field = field.name(),
            sync_error = sync_error.as_deref(),
            async_scheduled = scheduled.is_some(),
            "field changed"
        );
        slot.reduce(FieldIntent::Change {
            value: value.clone(),
            sync_error,
            async_scheduled: scheduled.is_some(),
        });
        if let Some(job) = scheduled {
            let debounce = job.debounce;
            self.spawn_validation(slot, value, job, debounce);
        }
        self.shared.publish(&state);
    }

    /// The async validator `field` should run next, if any.
    fn async_job(&self, field: V::Field, sync_failed: bool) -> Option<AsyncJob> {
        let options = &self.shared.options;
        if sync_failed && !options.async_always {
            return None;
        }
        let validators = options.validators_for(field)?;
        let validator = validators.async_validator()?;
        match Handle::try_current() {
            Ok(runtime) => Some(AsyncJob {
                validator,
                debounce: validators.debounce(),
                runtime,
            }),
            Err(_) => {
                warn!(
                    field = field.name(),
                    "no async runtime; skipping async validation"
                );
                None
            }
        }
    }

    /// Start `job` for the slot's current generation and remember its task.
    fn spawn_validation(
        &self,
        slot: &mut FieldSlot<V::Field>,
        value: String,
        job: AsyncJob,
        debounce: Duration,
    ) {
        let task = job.runtime.spawn(run_async_validation(
            Arc::downgrade(&self.shared),
            slot.name,
            slot.state.generation,
            value,
            job.validator,
            debounce,
        ));
        slot.task = Some(task.abort_handle());
    }

    /// Mark `field` as touched and run its blur validator.
    pub fn handle_blur(&self, field: V::Field) {
        let mut state = self.shared.state.lock();
        let validators = self.shared.options.validators_for(field);
        let Some(slot) = state.slot_mut(field) else {
            warn!(field = field.name(), "blur for unknown field ignored");
            return;
        };
        let blur_error = validators.and_then(|v| v.run_on_blur(&slot.state.value));
        slot.reduce(FieldIntent::Blur { blur_error });
        self.shared.publish(&state);
    }

    /// Replace the metadata of `field` with whatever `updater` returns.
    pub fn set_field_meta<F>(&self, field: V::Field, updater: F)
    where
        F: FnOnce(FieldMeta) -> FieldMeta,
    {
        let mut state = self.shared.state.lock();
        let Some(slot) = state.slot_mut(field) else {
            warn!(field = field.name(), "meta update for unknown field ignored");
            return;
        };
        let meta = updater(slot.state.meta.clone());
        debug!(
            field = field.name(),
            errors = meta.error_map.len(),
            "field meta updated"
        );
        slot.reduce(FieldIntent::ReplaceMeta { meta });
        self.shared.publish(&state);
    }

    /// Resolves once no field has an async validation scheduled or running.
    pub async fn validation_settled(&self) {
        let mut updates = self.subscribe();
        let settled = updates
            .wait_for(|snapshot| !snapshot.is_validation_pending)
            .await
            .is_ok();
        if !settled {
            warn!("form dropped while waiting for validation");
        }
    }

    /// Validate every field and hand the values to `on_submit`.
    ///
    /// Fails fast when a submission is already running or a field holds an
    /// error. Otherwise touches and revalidates all fields, reruns async
    /// validators without debounce and waits for them to settle. Returns
    /// whatever `on_submit` returned.
    pub async fn handle_submit<T, F, Fut>(&self, on_submit: F) -> Result<Option<T>, SubmitError>
    where
        F: FnOnce(V) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        self.begin_submit()?;
        let shared = Arc::clone(&self.shared);
        let _submitting = scopeguard::guard((), move |_| shared.finish_submit());

        self.validation_settled().await;

        let values = {
            let state = self.shared.state.lock();
            let errors = state.error_count();
            if errors > 0 {
                debug!(errors, "submit stopped by validation errors");
                return Err(SubmitError::ValidationFailed { errors });
            }
            state.values(&self.shared.options.defaults)
        };

        info!("submitting form");
        let result = on_submit(values).await;
        self.shared.state.lock().is_submitted = true;
        info!(accepted = result.is_some(), "submit handler finished");
        Ok(result)
    }

    fn begin_submit(&self) -> Result<(), SubmitError> {
        let mut state = self.shared.state.lock();
        if state.is_submitting {
            debug!("submit ignored: already submitting");
            return Err(SubmitError::AlreadySubmitting);
        }
        state.submission_attempts += 1;
        let errors = state.error_count();
        if errors > 0 {
            debug!(errors, "submit ignored: form has errors");
            self.shared.publish(&state);
            return Err(SubmitError::CannotSubmit { errors });
        }

        state.is_submitting = true;
        for slot in state.fields.iter_mut() {
            let validators = self.shared.options.validators_for(slot.name);
            let change_error = validators.and_then(|v| v.run_on_change(&slot.state.value));
            let blur_error = validators.and_then(|v| v.run_on_blur(&slot.state.value));
            let scheduled = self.async_job(slot.name, change_error.is_some());
            slot.cancel_task();
            slot.reduce(FieldIntent::SubmitAttempt {
                change_error,
                blur_error,
                async_scheduled: scheduled.is_some(),
            });
            if let Some(job) = scheduled {
                let value = slot.state.value.clone();
                self.spawn_validation(slot, value, job, Duration::ZERO);
            }
        }
        self.shared.publish(&state);
        Ok(())
    }

    /// Restore default values and drop all metadata.
    ///
    /// Pending validators are aborted; anything already past the abort point
    /// is discarded by the generation check.
    pub fn reset(&self) {
        let mut state = self.shared.state.lock();
        let defaults = &self.shared.options.defaults;
        for slot in state.fields.iter_mut() {
            slot.cancel_task();
            let value = defaults.value(slot.name).to_string();
            slot.reduce(FieldIntent::Reset { value });
        }
        state.is_submitted = false;
        state.submission_attempts = 0;
        debug!("form reset");
        self.shared.publish(&state);
    }
}

struct AsyncJob {
    validator: Arc<dyn AsyncValidator>,
    debounce: Duration,
    runtime: Handle,
}

async fn run_async_validation<V: FormValues>(
    shared: Weak<Shared<V>>,
    field: V::Field,
    generation: u64,
    value: String,
    validator: Arc<dyn AsyncValidator>,
    debounce: Duration,
) {
    tokio::time::sleep(debounce).await;

    let Some(form) = shared.upgrade() else {
        return;
    };
    if !form.dispatch_current(field, generation, FieldIntent::ValidationStarted { generation }) {
        return;
    }
    drop(form);
    let validator_name = validator.name();
    debug!(
        field = field.name(),
        validator = validator_name,
        generation,
        "async validation started"
    );

    // Separate task so a panicking validator still settles the field.
    let job = tokio::spawn(async move { validator.validate(&value).await });
    let abort_job = scopeguard::guard(job.abort_handle(), |handle| handle.abort());
    let outcome = job.await;
    scopeguard::ScopeGuard::into_inner(abort_job);
    let error = match outcome {
        Ok(error) => error,
        Err(err) if err.is_panic() => {
            warn!(
                field = field.name(),
                validator = validator_name,
                generation,
                "async validator panicked; settling without a result"
            );
            None
        }
        Err(_) => return,
    };

    let Some(form) = shared.upgrade() else {
        return;
    };
    let committed = form.dispatch_current(
        field,
        generation,
        FieldIntent::ValidationSettled {
            generation,
            error,
        },
    );
    if !committed {
        debug!(
            field = field.name(),
            generation, "discarded result of superseded validation"
        );
    }
}
