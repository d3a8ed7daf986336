//! Per-field validation state machine.

mod intent;
mod reducer;
mod state;

pub use intent::FieldIntent;
pub use reducer::FieldReducer;
pub use state::{FieldMeta, FieldState};
