use serde::Serialize;

use crate::form::error_map::{ErrorMap, ErrorSource};
use crate::mvi::ViewState;

/// Validation metadata for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    /// Set on first blur (or submit attempt) and kept until reset.
    pub is_touched: bool,
    /// Set on first change and kept until reset.
    pub is_dirty: bool,
    /// True only while the latest async validator is running.
    pub is_validating: bool,
    pub error_map: ErrorMap,
}

impl FieldMeta {
    /// Return a copy with `message` recorded under `source`.
    ///
    /// Convenient inside [`Form::set_field_meta`](crate::form::Form::set_field_meta)
    /// updaters.
    pub fn with_error(mut self, source: ErrorSource, message: impl Into<String>) -> Self {
        self.error_map.set(source, message);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.error_map.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.error_map.messages()
    }
}

/// Everything the reducer tracks for one field.
///
/// `generation` counts changes and resets. An async validation result is
/// only committed when it carries the current generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub meta: FieldMeta,
    pub generation: u64,
    /// An async validation is scheduled or running for `generation`.
    pub validation_pending: bool,
}

impl FieldState {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

impl ViewState for FieldState {}
