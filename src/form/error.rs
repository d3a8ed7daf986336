use thiserror::Error;

/// Reasons a submit did not reach the submit handler.
///
/// Server-side failures are not listed here: the handler turns them into
/// field errors instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Form cannot be submitted: {errors} field error(s) outstanding")]
    CannotSubmit { errors: usize },

    #[error("Validation failed with {errors} field error(s)")]
    ValidationFailed { errors: usize },
}
