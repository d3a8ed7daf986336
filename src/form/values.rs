use std::fmt::Debug;

use serde::Serialize;

/// Identifies one field of a form's value type.
pub trait FieldKey: Copy + Eq + Debug + Send + Sync + 'static {
    /// Name used in snapshots, logs and JSON output.
    fn name(self) -> &'static str;
}

/// A value type that a [`Form`](crate::form::Form) can edit field by field.
///
/// Fields are text-valued. Anything else on the type (identifiers assigned
/// by a server, for instance) is carried through untouched.
pub trait FormValues: Clone + Debug + Serialize + Send + Sync + 'static {
    type Field: FieldKey;

    /// All editable fields, in display order.
    fn fields() -> &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn set_value(&mut self, field: Self::Field, value: String);
}
