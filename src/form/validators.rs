//! Validator registration for a single field.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Debounce window applied to async validators unless overridden.
pub const DEFAULT_ASYNC_DEBOUNCE: Duration = Duration::from_millis(500);

/// Synchronous validator: `None` means the value is acceptable.
pub type SyncValidator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Validator that needs to suspend, typically to ask a remote service.
#[async_trait]
pub trait AsyncValidator: Send + Sync {
    /// Name used in trace events.
    fn name(&self) -> &'static str;

    /// Returns `Some(message)` when `value` is rejected.
    async fn validate(&self, value: &str) -> Option<String>;
}

/// The validators attached to one field.
#[derive(Clone)]
pub struct FieldValidators {
    on_change: Option<SyncValidator>,
    on_blur: Option<SyncValidator>,
    on_change_async: Option<Arc<dyn AsyncValidator>>,
    async_debounce: Duration,
}

impl Default for FieldValidators {
    fn default() -> Self {
        Self {
            on_change: None,
            on_blur: None,
            on_change_async: None,
            async_debounce: DEFAULT_ASYNC_DEBOUNCE,
        }
    }
}

impl FieldValidators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(validator));
        self
    }

    pub fn on_blur<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.on_blur = Some(Arc::new(validator));
        self
    }

    pub fn on_change_async(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.on_change_async = Some(Arc::new(validator));
        self
    }

    pub fn async_debounce(mut self, debounce: Duration) -> Self {
        self.async_debounce = debounce;
        self
    }

    pub fn run_on_change(&self, value: &str) -> Option<String> {
        self.on_change.as_ref().and_then(|validate| validate(value))
    }

    pub fn run_on_blur(&self, value: &str) -> Option<String> {
        self.on_blur.as_ref().and_then(|validate| validate(value))
    }

    pub fn async_validator(&self) -> Option<Arc<dyn AsyncValidator>> {
        self.on_change_async.clone()
    }

    pub fn debounce(&self) -> Duration {
        self.async_debounce
    }
}
