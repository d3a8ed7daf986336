use serde::{Deserialize, Serialize};

use crate::form::{FieldKey, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Assigned by the server once the person is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    FirstName,
    LastName,
}

impl FieldKey for PersonField {
    fn name(self) -> &'static str {
        match self {
            PersonField::FirstName => "firstName",
            PersonField::LastName => "lastName",
        }
    }
}

impl FormValues for Person {
    type Field = PersonField;

    fn fields() -> &'static [PersonField] {
        &[PersonField::FirstName, PersonField::LastName]
    }

    fn value(&self, field: PersonField) -> &str {
        match field {
            PersonField::FirstName => &self.first_name,
            PersonField::LastName => &self.last_name,
        }
    }

    fn set_value(&mut self, field: PersonField, value: String) {
        match field {
            PersonField::FirstName => self.first_name = value,
            PersonField::LastName => self.last_name = value,
        }
    }
}
