//! Remote-processing request/result correlation.
//!
//! A caller connects to the processing namespace, learns its session id from
//! `session:connected`, POSTs a [`RemoteProcessRequest`] carrying that id, and
//! waits for the `processing:result` frame addressed to the same session.
//!
//! ```text
//! Connecting ──session:connected──► Ready ──begin()──► Awaiting
//!                                                     │
//!                     processing:result (same session)├──► Completed
//!                        error frame / abort()        └──► Failed
//! ```

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use frames::Frame;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RecordId;
use crate::logs::TransactionStatus;
use crate::validation::{ValidationErrors, require};

pub const PROCESS_PATH: &str = "/api/remote/process";
pub const RESULT_EVENT: &str = "processing:result";

/// Body of `POST /api/remote/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProcessRequest {
    pub initiator_key: String,
    pub session_id: String,
    pub app_instance_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type_id: Option<RecordId>,
}

impl RemoteProcessRequest {
    /// # Errors
    ///
    /// Returns every missing or out-of-range field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "initiator_key", &self.initiator_key);
        require(&mut errors, "session_id", &self.session_id);
        if self.app_instance_id <= 0 {
            errors.push("app_instance_id", "select an app instance");
        }
        errors.into_result()
    }
}

/// Outcome pushed once the agent finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    #[serde(default)]
    pub session_id: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub transaction_id: Option<RecordId>,
    /// Extracted field values, shape owned by the backend.
    #[serde(default)]
    pub data: Value,
}

impl ProcessingResult {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}

/// Operator-side inputs of a remote request; the session id is filled in by [`RemoteSession`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCommand {
    pub initiator_key: String,
    pub app_instance_id: RecordId,
    pub device_id: Option<RecordId>,
    pub document_type_id: Option<RecordId>,
}

impl RemoteCommand {
    /// Checks that need no session, so input can be rejected before connecting.
    ///
    /// # Errors
    ///
    /// Returns every missing or out-of-range field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "initiator_key", self.initiator_key.trim());
        if self.app_instance_id <= 0 {
            errors.push("app_instance_id", "select an app instance");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Connecting,
    Ready { session_id: String },
    Awaiting { session_id: String },
    Completed(ProcessingResult),
    Failed(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RemoteError {
    #[error("the processing channel has not announced a session yet")]
    NotConnected,
    #[error("a request is already in progress")]
    Busy,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// One request/result exchange on the processing namespace.
#[derive(Debug, Clone)]
pub struct RemoteSession {
    phase: SessionPhase,
    session_id: Option<String>,
}

impl Default for RemoteSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Connecting,
            session_id: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed(_) | SessionPhase::Failed(_))
    }

    /// Fold one frame into the session. Returns whether the phase changed.
    ///
    /// Results addressed to another session are ignored.
    pub fn observe(&mut self, frame: &Frame) -> bool {
        if let Some(session_id) = frame.connected_session_id() {
            if matches!(self.phase, SessionPhase::Connecting) {
                self.session_id = Some(session_id.to_owned());
                self.phase = SessionPhase::Ready {
                    session_id: session_id.to_owned(),
                };
                return true;
            }
            return false;
        }

        let SessionPhase::Awaiting { session_id } = &self.phase else {
            return false;
        };
        if frame.event != RESULT_EVENT || frame_session(frame) != Some(session_id.as_str()) {
            return false;
        }

        self.phase = if let Some(message) = frame.error_message() {
            SessionPhase::Failed(message.to_owned())
        } else {
            match serde_json::from_value::<ProcessingResult>(frame.data.clone()) {
                Ok(result) => SessionPhase::Completed(result),
                Err(e) => SessionPhase::Failed(format!("unreadable result: {e}")),
            }
        };
        true
    }

    /// Build the POST body and start waiting for the result.
    ///
    /// Waiting starts before the POST is sent, so a result pushed ahead of the
    /// HTTP response is not lost.
    ///
    /// # Errors
    ///
    /// [`RemoteError::NotConnected`] before `session:connected`,
    /// [`RemoteError::Busy`] while a result is pending, and
    /// [`RemoteError::Validation`] for bad input. State is unchanged on error.
    pub fn begin(&mut self, command: RemoteCommand) -> Result<RemoteProcessRequest, RemoteError> {
        let session_id = match &self.phase {
            SessionPhase::Connecting => return Err(RemoteError::NotConnected),
            SessionPhase::Awaiting { .. } => return Err(RemoteError::Busy),
            SessionPhase::Ready { session_id } => session_id.clone(),
            SessionPhase::Completed(_) | SessionPhase::Failed(_) => {
                self.session_id.clone().ok_or(RemoteError::NotConnected)?
            }
        };
        let request = RemoteProcessRequest {
            initiator_key: command.initiator_key.trim().to_owned(),
            session_id: session_id.clone(),
            app_instance_id: command.app_instance_id,
            device_id: command.device_id,
            document_type_id: command.document_type_id,
        };
        request.validate()?;
        self.phase = SessionPhase::Awaiting { session_id };
        Ok(request)
    }

    /// The POST itself failed; no result will arrive.
    pub fn abort(&mut self, message: impl Into<String>) {
        if matches!(self.phase, SessionPhase::Awaiting { .. }) {
            self.phase = SessionPhase::Failed(message.into());
        }
    }
}

fn frame_session(frame: &Frame) -> Option<&str> {
    frame
        .session_id
        .as_deref()
        .or_else(|| frame.data.get("session_id").and_then(Value::as_str))
}
