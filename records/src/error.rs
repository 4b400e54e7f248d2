//! Error categories shared by every screen.
//!
//! Failures are only ever transport problems, non-2xx responses, undecodable
//! bodies, or local validation. None are retried; screens keep their previous
//! state and show [`ApiError::user_message`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("request failed with status {status}{}", detail_suffix(.message.as_deref()))]
    Status { status: u16, message: Option<String> },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// Local validation rejected the input; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

fn detail_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    /// Build a status error from a response body, lifting a JSON `message` field when present.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(serde_json::Value::as_str).map(str::to_owned))
            .filter(|m| !m.trim().is_empty());
        Self::Status { status, message }
    }

    /// Text shown inline on a screen.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Check the connection and try again.".to_owned(),
            Self::Status { message: Some(message), .. } => message.clone(),
            Self::Status { status, message: None } => format!("The server rejected the request ({status})."),
            Self::Decode(_) => "The server sent an unexpected response.".to_owned(),
            Self::Validation(errors) => errors.summary(),
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}
