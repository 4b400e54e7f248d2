//! Create/edit form state for a generic resource screen.
//!
//! ERROR HANDLING
//! ==============
//! [`FormState::prepare`] is the only way to obtain a typed record. When it
//! fails, field errors are stored and the caller sends nothing.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use records::form::FormValues;
use records::{ApiError, RecordId, Resource, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// `None` while creating.
    pub id: Option<RecordId>,
    pub values: FormValues,
    pub errors: ValidationErrors,
    /// Non-field error from the last submit.
    pub error: Option<String>,
    /// A request is in flight; the submit button is disabled.
    pub busy: bool,
}

impl FormState {
    /// Blank form for a new `R`.
    #[must_use]
    pub fn create<R: Resource>() -> Self {
        Self {
            values: FormValues::blank(R::fields()),
            ..Self::default()
        }
    }

    /// Form seeded from an existing record.
    #[must_use]
    pub fn edit<R: Resource>(record: &R) -> Self {
        Self {
            id: record.id(),
            values: record.to_form(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_text(&mut self, key: &'static str, value: String) {
        self.values.set_text(key, value);
    }

    pub fn set_flag(&mut self, key: &'static str, value: bool) {
        self.values.set_flag(key, value);
    }

    #[must_use]
    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.errors.for_field(key)
    }

    /// Build and validate the record. On success the form is marked busy.
    pub fn prepare<R: Resource>(&mut self) -> Option<R> {
        self.error = None;
        match R::from_form(self.id, &self.values) {
            Ok(record) => {
                self.errors = ValidationErrors::new();
                self.busy = true;
                Some(record)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Record a failed submit. The entered values are kept for a retry.
    pub fn fail(&mut self, error: ApiError) {
        self.busy = false;
        match error {
            ApiError::Validation(errors) => self.errors = errors,
            other => self.error = Some(other.user_message()),
        }
    }
}
