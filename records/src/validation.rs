//! Field-level validation helpers.
//!
//! Validation is the only place entity invariants are enforced on the client.
//! Helpers push into a shared [`ValidationErrors`] so a form can report every
//! problem at once.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::fmt;
use std::str::FromStr;

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failed field of one submission, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Only the first message per field is kept.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if self.for_field(field).is_some() {
            return;
        }
        self.0.push(FieldError { field, message: message.into() });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// One-line description for alert banners.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(())` when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

pub const REQUIRED: &str = "is required";

/// Require a non-blank value.
pub fn require(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, REQUIRED);
        return false;
    }
    true
}

/// Require an `http://` or `https://` URL.
pub fn require_url(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if !require(errors, field, value) {
        return;
    }
    let lower = value.trim().to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        errors.push(field, "must start with http:// or https://");
    }
}

/// Parse a required strictly positive number.
pub fn positive<T>(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    if !require(errors, field, value) {
        return None;
    }
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Some(n),
        Ok(_) => {
            errors.push(field, "must be greater than zero");
            None
        }
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

/// Parse an optional record id; blank means "none".
pub fn optional_id(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<crate::RecordId> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse() {
        Some(id)
    } else {
        errors.push(field, "must reference an existing record");
        None
    }
}

/// Parse a JSON document; blank input yields `default`.
pub fn json_or<T>(errors: &mut ValidationErrors, field: &'static str, value: &str, default: T) -> T
where
    T: serde::de::DeserializeOwned,
{
    if value.trim().is_empty() {
        return default;
    }
    match serde_json::from_str(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            errors.push(field, format!("must be valid JSON ({e})"));
            default
        }
    }
}

/// Parse a select value with `parse`; unknown values fall back to the default.
pub fn choice<T: Default>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    if let Some(parsed) = parse(value.trim()) {
        return parsed;
    }
    if value.trim().is_empty() {
        errors.push(field, REQUIRED);
    } else {
        errors.push(field, "is not a valid choice");
    }
    T::default()
}

/// Require exactly one of `choices` to be selected.
pub fn exactly_one(errors: &mut ValidationErrors, field: &'static str, choices: &[bool]) {
    let selected = choices.iter().filter(|c| **c).count();
    match selected {
        1 => {}
        0 => errors.push(field, "select exactly one destination"),
        _ => errors.push(field, "only one destination may be selected"),
    }
}
