//! Form state with debounced async validation and server-side submit
//! errors, demonstrated on a "create person" form.

pub mod config;
pub mod form;
pub mod logging;
pub mod mvi;
pub mod person;
pub mod view;
