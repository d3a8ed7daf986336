use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ValidationConfig;
use crate::form::{ErrorSource, FieldValidators, Form, FormOptions, SubmitError};
use crate::person::model::{Person, PersonField};
use crate::person::server::PersonApi;
use crate::person::validation::{first_name_validator, NoErrorSubstring};

/// Person form bound to a [`PersonApi`].
///
/// A server rejection does not fail the submit: the message lands in the
/// first name's `onServer` error and the form stays open for editing.
#[derive(Clone)]
pub struct PersonForm {
    form: Form<Person>,
    api: Arc<dyn PersonApi>,
}

impl PersonForm {
    pub fn new(config: &ValidationConfig, api: Arc<dyn PersonApi>) -> Self {
        let first_name = FieldValidators::new()
            .on_change(first_name_validator(config.first_name_min_len))
            .on_change_async(NoErrorSubstring::new(config.async_delay()))
            .async_debounce(config.async_debounce());

        let options = FormOptions::new(Person::default())
            .field(PersonField::FirstName, first_name)
            .async_always(config.async_always);

        Self {
            form: Form::new(options),
            api,
        }
    }

    pub fn form(&self) -> &Form<Person> {
        &self.form
    }

    /// Submit the current values.
    ///
    /// `Ok(Some(person))` carries the created person. `Ok(None)` means the
    /// server refused, and the refusal is already recorded on the first
    /// name field.
    pub async fn submit(&self) -> Result<Option<Person>, SubmitError> {
        let api = Arc::clone(&self.api);
        let form = self.form.clone();

        self.form
            .handle_submit(move |person| async move {
                match api.create_person(&person).await {
                    Ok(created) => {
                        info!(id = created.id, "person created");
                        Some(created)
                    }
                    Err(err) => {
                        warn!(error = %err, "server rejected person");
                        form.set_field_meta(PersonField::FirstName, |meta| {
                            meta.with_error(ErrorSource::OnServer, err.to_string())
                        });
                        None
                    }
                }
            })
            .await
    }

    pub fn reset(&self) {
        self.form.reset();
    }
}
