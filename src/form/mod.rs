//! Form state: values, per-field validation metadata and the submit
//! lifecycle.
//!
//! ```text
//! change ──→ sync validator ──→ FieldState ──→ snapshot
//!    │                              ↑
//!    └──→ debounce ──→ async validator (latest generation only)
//! ```

mod controller;
mod error;
mod error_map;
pub mod field;
mod snapshot;
mod validators;
mod values;

pub use controller::{Form, FormOptions};
pub use error::SubmitError;
pub use error_map::{ErrorMap, ErrorSource};
pub use field::{FieldMeta, FieldState};
pub use snapshot::{FieldSnapshot, FormSnapshot};
pub use validators::{AsyncValidator, FieldValidators, SyncValidator, DEFAULT_ASYNC_DEBOUNCE};
pub use values::{FieldKey, FormValues};
