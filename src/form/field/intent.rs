use crate::form::field::FieldMeta;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FieldIntent {
    /// The value was edited. The caller has already run the sync validator
    /// and decided whether an async validation gets scheduled.
    Change {
        value: String,
        sync_error: Option<String>,
        async_scheduled: bool,
    },
    /// The field lost focus.
    Blur { blur_error: Option<String> },
    /// A submit was attempted: touch the field, record fresh sync results
    /// and, when `async_scheduled`, start a new async validation round.
    SubmitAttempt {
        change_error: Option<String>,
        blur_error: Option<String>,
        async_scheduled: bool,
    },
    /// The debounce window for `generation` elapsed and the validator started.
    ValidationStarted { generation: u64 },
    /// The async validator for `generation` finished.
    ValidationSettled {
        generation: u64,
        error: Option<String>,
    },
    /// Replace the metadata wholesale (external updater).
    ReplaceMeta { meta: FieldMeta },
    /// Restore the default value and drop all metadata.
    Reset { value: String },
}

impl Intent for FieldIntent {}
