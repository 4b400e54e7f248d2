//! Keeping a fetched log list current from push frames.
//!
//! ```text
//! socket ──frame──► decode_feed_event::<T> ──FeedEvent──► LiveList::apply
//! ```
//!
//! Events are applied in arrival order. Created rows are re-sorted newest
//! first; updates never reorder.
//!
//! While a fetch is in flight the list holds incoming events and replays them
//! over the fetched rows once they land, so a delete or update that races
//! the fetch is not lost.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use frames::Frame;
use serde_json::Value;

use crate::RecordId;
use crate::resource::LogRecord;

/// A change to one record, decoded from the logs namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent<T> {
    Created(T),
    Updated(T),
    Deleted(RecordId),
}

/// Why a frame for our topic could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("unknown event verb `{0}`")]
    UnknownVerb(String),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("deleted event without an id")]
    MissingId,
}

/// Decode `frame` into an event for `T`.
///
/// Frames for other topics, and error frames, yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`FeedError`] when the frame is addressed to `T::TOPIC` but its
/// verb or payload is not understood.
pub fn decode_feed_event<T: LogRecord>(frame: &Frame) -> Result<Option<FeedEvent<T>>, FeedError> {
    if frame.topic() != T::TOPIC || frame.error_message().is_some() {
        return Ok(None);
    }
    let event = match frame.verb() {
        "created" => FeedEvent::Created(serde_json::from_value(frame.data.clone())?),
        "updated" => FeedEvent::Updated(serde_json::from_value(frame.data.clone())?),
        "deleted" => FeedEvent::Deleted(deleted_id(&frame.data).ok_or(FeedError::MissingId)?),
        other => return Err(FeedError::UnknownVerb(other.to_owned())),
    };
    Ok(Some(event))
}

fn deleted_id(data: &Value) -> Option<RecordId> {
    data.get("id").and_then(Value::as_i64).or_else(|| data.as_i64())
}

/// Log list maintained from an initial fetch plus push events.
#[derive(Debug, Clone)]
pub struct LiveList<T> {
    rows: Vec<T>,
    /// Events received while a fetch is outstanding.
    held: Option<Vec<FeedEvent<T>>>,
}

impl<T> Default for LiveList<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            held: None,
        }
    }
}

impl<T: LogRecord> LiveList<T> {
    /// Seed from a fetch, newest first.
    #[must_use]
    pub fn from_fetch(rows: Vec<T>) -> Self {
        let mut list = Self { rows, held: None };
        list.sort();
        list
    }

    /// Empty list that holds events until [`LiveList::seed`].
    #[must_use]
    pub fn awaiting_fetch() -> Self {
        Self {
            rows: Vec::new(),
            held: Some(Vec::new()),
        }
    }

    /// Start holding events again, e.g. for a refetch after a reconnect.
    pub fn hold(&mut self) {
        if self.held.is_none() {
            self.held = Some(Vec::new());
        }
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Replace the rows with a fetch, then replay held events in arrival order.
    pub fn seed(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.sort();
        self.release();
    }

    /// Stop holding and apply held events over the current rows.
    pub fn release(&mut self) {
        for event in self.held.take().unwrap_or_default() {
            self.apply(event);
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply one change. Returns whether the list changed.
    ///
    /// A held list queues the event and reports no change.
    pub fn apply(&mut self, event: FeedEvent<T>) -> bool {
        if let Some(held) = &mut self.held {
            held.push(event);
            return false;
        }
        match event {
            FeedEvent::Created(row) => {
                let id = row.id();
                self.rows.retain(|r| r.id() != id);
                self.rows.insert(0, row);
                self.sort();
                true
            }
            FeedEvent::Updated(row) => {
                let id = row.id();
                match self.rows.iter_mut().find(|r| r.id() == id) {
                    Some(slot) => {
                        *slot = row;
                        true
                    }
                    None => false,
                }
            }
            FeedEvent::Deleted(id) => {
                let before = self.rows.len();
                self.rows.retain(|r| r.id() != id);
                self.rows.len() != before
            }
        }
    }

    fn sort(&mut self) {
        // Stable: rows with equal timestamps keep arrival order.
        self.rows.sort_by_key(|r| std::cmp::Reverse(r.timestamp()));
    }
}
