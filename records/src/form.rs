//! Field specs and form values for generated create/edit forms.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeMap;

/// Input control a field renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    TextArea,
    Number,
    Checkbox,
    /// Fixed choices as `(value, label)` pairs.
    Select(&'static [(&'static str, &'static str)]),
    /// Options loaded from another resource's list endpoint.
    Reference(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: false }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn is_flag(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Current contents of a form, keyed by [`FieldSpec::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<&'static str, FieldValue>);

impl FormValues {
    /// Empty values for every field in `specs`.
    #[must_use]
    pub fn blank(specs: &[FieldSpec]) -> Self {
        let mut values = Self::default();
        for spec in specs {
            let value = if spec.is_flag() {
                FieldValue::Flag(false)
            } else {
                FieldValue::Text(String::new())
            };
            values.0.insert(spec.key, value);
        }
        values
    }

    pub fn set_text(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, FieldValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, key: &'static str, value: bool) {
        self.0.insert(key, FieldValue::Flag(value));
    }

    /// Builder-style [`set_text`](Self::set_text).
    #[must_use]
    pub fn with_text(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.set_text(key, value);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, key: &'static str, value: bool) -> Self {
        self.set_flag(key, value);
        self
    }

    /// Text value of `key`; missing or flag fields read as empty.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        match self.0.get(key) {
            Some(FieldValue::Text(v)) => v,
            _ => "",
        }
    }

    /// Flag value of `key`; missing or text fields read as `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(FieldValue::Flag(true)))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }
}

/// Render an optional id as form text.
#[must_use]
pub fn id_text(id: Option<crate::RecordId>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}
