//! Traits that let one table and one form serve every screen.
//!
//! A [`Row`] knows how to present itself in a table. A [`Resource`] is an
//! editable row backed by a REST collection; a [`LogRecord`] is an immutable
//! row that also arrives over the logs push namespace.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::RecordId;
use crate::form::{FieldSpec, FormValues};
use crate::validation::ValidationErrors;

/// Anything a list screen can render.
pub trait Row {
    /// Column headers, in display order.
    fn columns() -> &'static [&'static str]
    where
        Self: Sized;

    /// Cell text, one entry per column.
    fn cells(&self) -> Vec<String>;

    /// Text matched against the search query. Defaults to every cell.
    fn search_text(&self) -> String {
        self.cells().join(" ")
    }

    /// Value compared against the enum filter, if this row type has one.
    fn category(&self) -> Option<&'static str> {
        None
    }

    /// `(value, label)` choices for the enum filter.
    fn filter_options() -> &'static [(&'static str, &'static str)]
    where
        Self: Sized,
    {
        &[]
    }
}

/// An editable entity backed by a REST collection.
pub trait Resource: Row + Clone + Serialize + DeserializeOwned + 'static {
    /// Collection path, e.g. `/api/access-rights`.
    const ENDPOINT: &'static str;
    /// Screen heading.
    const TITLE: &'static str;

    fn id(&self) -> Option<RecordId>;

    /// Form layout for create and edit.
    fn fields() -> &'static [FieldSpec];

    fn to_form(&self) -> FormValues;

    /// Build a typed value from form input, validating as it goes.
    ///
    /// # Errors
    ///
    /// Returns every field that failed to parse or validate.
    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors>;

    /// Invariants that hold regardless of how the value was built.
    ///
    /// # Errors
    ///
    /// Returns every field that violates an invariant.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Active flag, for resources that have one.
    fn active(&self) -> Option<bool> {
        None
    }

    fn set_active(&mut self, _active: bool) {}

    /// Path of a single record.
    #[must_use]
    fn item_path(id: RecordId) -> String
    where
        Self: Sized,
    {
        format!("{}/{id}", Self::ENDPOINT)
    }
}

/// An immutable server-generated log entry.
pub trait LogRecord: Row + Clone + DeserializeOwned + 'static {
    const ENDPOINT: &'static str;
    /// Topic half of the push event names for this record type.
    const TOPIC: &'static str;
    const TITLE: &'static str;

    fn id(&self) -> RecordId;

    fn timestamp(&self) -> DateTime<Utc>;
}

/// Timestamp format used in table cells.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Display text for an optional value.
#[must_use]
pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

/// Display text for a flag column.
#[must_use]
pub fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_owned()
}
