//! Keyed, ordered accumulator for field errors.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Where an error in a field's [`ErrorMap`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorSource {
    /// Synchronous validator run on every change.
    OnChange,
    /// Debounced asynchronous validator run after a change.
    OnChangeAsync,
    /// Synchronous validator run when the field loses focus.
    OnBlur,
    /// Error reported by the remote collaborator after a submit.
    OnServer,
}

impl ErrorSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorSource::OnChange => "onChange",
            ErrorSource::OnChangeAsync => "onChangeAsync",
            ErrorSource::OnBlur => "onBlur",
            ErrorSource::OnServer => "onServer",
        }
    }
}

impl std::fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error messages keyed by [`ErrorSource`].
///
/// Entries keep the order in which their source first reported. Replacing a
/// message keeps the entry's slot, and writing one source never touches the
/// others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(ErrorSource, String)>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: ErrorSource) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, source: ErrorSource) -> bool {
        self.get(source).is_some()
    }

    /// Set the message for `source`, replacing any previous one.
    ///
    /// An empty message counts as "no error" and removes the entry.
    pub fn set(&mut self, source: ErrorSource, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.remove(source);
            return;
        }
        match self.entries.iter_mut().find(|(s, _)| *s == source) {
            Some((_, existing)) => *existing = message,
            None => self.entries.push((source, message)),
        }
    }

    /// Set or clear `source` depending on a validator result.
    pub fn apply(&mut self, source: ErrorSource, result: Option<String>) {
        match result {
            Some(message) => self.set(source, message),
            None => {
                self.remove(source);
            }
        }
    }

    pub fn remove(&mut self, source: ErrorSource) -> Option<String> {
        let index = self.entries.iter().position(|(s, _)| *s == source)?;
        Some(self.entries.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorSource, &str)> {
        self.entries
            .iter()
            .map(|(source, message)| (*source, message.as_str()))
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, message)| message.as_str())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (source, message) in &self.entries {
            map.serialize_entry(source.as_str(), message)?;
        }
        map.end()
    }
}
