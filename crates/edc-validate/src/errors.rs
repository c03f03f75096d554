use std::collections::BTreeMap;

use serde::Serialize;

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Error messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a field. Repeated messages are kept once.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.errors.entry(field.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Messages for a field (empty if none).
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field_errors(&self) -> &[String] {
        self.get(NON_FIELD_ERRORS)
    }

    pub fn has_field(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// Whether any field carries `message`.
    pub fn contains(&self, message: &str) -> bool {
        self.errors
            .values()
            .any(|messages| messages.iter().any(|m| m == message))
    }

    /// `(field, message)` pairs, fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| (field.as_str(), message.as_str()))
        })
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
