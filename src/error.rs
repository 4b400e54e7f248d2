//! Console error type.
//!
//! Every command returns `Result<(), ConsoleError>`; `main` prints the error
//! and exits non-zero. Server-side categories reuse [`records::ApiError`] so
//! the console and the browser report failures with the same wording.

use records::remote::RemoteError;
use records::{ApiError, RecordId, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),
    #[error("no record with id {0}")]
    NotFound(RecordId),
    #[error("{0} have no active flag")]
    NoActiveFlag(&'static str),
    #[error("remote processing: {0}")]
    Remote(#[from] RemoteError),
    #[error("remote processing failed: {0}")]
    ProcessingFailed(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for ConsoleError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WsConnect(Box::new(error))
    }
}
