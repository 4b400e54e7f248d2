//! Optimistic active-flag toggles.
//!
//! The flag flips locally first; the caller then sends the partial update and
//! either commits or rolls back the returned [`PendingToggle`].

#[cfg(test)]
#[path = "optimistic_test.rs"]
mod optimistic_test;

use serde_json::{Value, json};

use crate::RecordId;
use crate::resource::Resource;
use crate::table::TableState;

/// Snapshot of a flag flipped ahead of the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending toggle must be committed or rolled back"]
pub struct PendingToggle {
    id: RecordId,
    previous: bool,
}

impl PendingToggle {
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn previous(&self) -> bool {
        self.previous
    }

    /// Value now shown locally and requested from the server.
    #[must_use]
    pub fn desired(&self) -> bool {
        !self.previous
    }

    /// Partial update body for `PUT {endpoint}/{id}`.
    #[must_use]
    pub fn request_body(&self) -> Value {
        json!({ "active": self.desired() })
    }

    /// Restore the pre-toggle value after a failed request.
    ///
    /// A row removed in the meantime is left alone.
    pub fn rollback<R: Resource>(self, table: &mut TableState<R>) {
        if let Some(row) = table.find_mut(self.id) {
            row.set_active(self.previous);
        }
    }

    /// Keep the toggled value.
    pub fn commit(self) {}
}

/// Flip the active flag of row `id` locally.
///
/// Returns `None` when the row is missing or the resource has no active flag.
pub fn begin_toggle<R: Resource>(table: &mut TableState<R>, id: RecordId) -> Option<PendingToggle> {
    let row = table.find_mut(id)?;
    let previous = row.active()?;
    row.set_active(!previous);
    Some(PendingToggle { id, previous })
}
