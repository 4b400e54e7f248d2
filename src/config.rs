//! Console settings: flags first, then environment, then defaults.
//!
//! `DOCFLOW_BASE_URL` and `DOCFLOW_SESSION_TOKEN` are read by clap. Timeouts
//! come from the environment only. A `.env` file in the working directory
//! is loaded before either is consulted.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use frames::Namespace;

use crate::error::ConsoleError;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RESULT_TIMEOUT_SECS: u64 = 120;

/// Resolved console configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Origin without a trailing slash, e.g. `http://127.0.0.1:3000`.
    pub base_url: String,
    /// Forwarded as the `session_token` cookie on every call.
    pub session_token: Option<String>,
    pub request_timeout: Duration,
    /// Bounds both HTTP connects and the websocket handshake.
    pub connect_timeout: Duration,
    /// How long `remote process` waits for its result.
    pub result_timeout: Duration,
}

impl Settings {
    /// # Errors
    ///
    /// [`ConsoleError::InvalidBaseUrl`] unless the URL is `http://` or `https://`.
    pub fn new(base_url: &str, session_token: Option<String>) -> Result<Self, ConsoleError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConsoleError::InvalidBaseUrl(base_url.to_owned()));
        }
        Ok(Self {
            base_url: base_url.to_owned(),
            session_token: session_token.filter(|t| !t.trim().is_empty()),
            request_timeout: Duration::from_secs(env_parse_u64(
                "DOCFLOW_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(env_parse_u64(
                "DOCFLOW_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            result_timeout: Duration::from_secs(env_parse_u64(
                "DOCFLOW_RESULT_TIMEOUT_SECS",
                DEFAULT_RESULT_TIMEOUT_SECS,
            )),
        })
    }

    /// Websocket URL of a push namespace on the same origin.
    #[must_use]
    pub fn ws_url(&self, namespace: Namespace) -> String {
        let rest = self
            .base_url
            .strip_prefix("https://")
            .map(|rest| format!("wss://{rest}"))
            .or_else(|| self.base_url.strip_prefix("http://").map(|rest| format!("ws://{rest}")))
            .unwrap_or_else(|| self.base_url.clone());
        format!("{rest}{}", namespace.path())
    }
}

pub(crate) fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
