//! Model-View-Intent (MVI) primitives for form state.
//!
//! Field state only changes by feeding intents through a reducer. Side
//! effects (timers, validator tasks) live in the form controller and report
//! back as new intents.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Snapshot ──→ Subscribers
//!    ↑                                               │
//!    └───────────────────────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ViewState;
