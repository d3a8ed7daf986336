use serde::Serialize;

use crate::form::field::FieldMeta;
use crate::form::values::FormValues;

/// Read-only view of one field handed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSnapshot {
    pub name: &'static str,
    pub value: String,
    pub meta: FieldMeta,
}

/// Read-only view of the whole form, published after every state change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot<V: FormValues> {
    pub values: V,
    pub fields: Vec<FieldSnapshot>,
    pub can_submit: bool,
    pub is_submitting: bool,
    pub is_submitted: bool,
    pub is_validating: bool,
    /// Some field has an async validation scheduled or running.
    pub is_validation_pending: bool,
    pub submission_attempts: u32,
}

impl<V: FormValues> FormSnapshot<V> {
    pub fn field(&self, name: &str) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|field| field.name == name)
    }
}
