//! Text rendering of form state for the terminal demo.

use crate::form::FieldSnapshot;
use crate::person::Person;

/// Inline status under a field: errors once touched, then the
/// validation indicator.
pub fn field_info(field: &FieldSnapshot) -> Option<String> {
    let mut parts = Vec::new();
    if field.meta.is_touched && field.meta.has_errors() {
        parts.push(field.meta.errors().collect::<Vec<_>>().join(","));
    }
    if field.meta.is_validating {
        parts.push("Validating...".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// What the user wants to happen after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    CreateAndClose,
    CreateAndContinue,
}

impl SubmitAction {
    pub fn label(self, is_submitting: bool) -> &'static str {
        if is_submitting {
            return "...";
        }
        match self {
            SubmitAction::CreateAndClose => "Create and close",
            SubmitAction::CreateAndContinue => "Create and continue editing",
        }
    }

    pub fn success_message(self, person: &Person) -> String {
        match self {
            SubmitAction::CreateAndClose => {
                "Successfully created item. Navigating to list view ...".to_string()
            }
            SubmitAction::CreateAndContinue => match person.id {
                Some(id) => format!(
                    "Successfully created item. Navigating now to item with id: {id}"
                ),
                None => "Successfully created item.".to_string(),
            },
        }
    }
}
