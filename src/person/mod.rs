//! The "create person" form: value type, validators, the simulated server
//! and the submit flow that ties them together.

mod form;
mod model;
mod server;
mod validation;

pub use form::PersonForm;
pub use model::{Person, PersonField};
pub use server::{PersonApi, ServerError, SimulatedServer};
pub use validation::{first_name_validator, NoErrorSubstring};
