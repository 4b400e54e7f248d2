//! Push-channel subscription for the console.
//!
//! ```text
//! connect_async ──► reader task ──Frame──► mpsc ──► FeedSubscription::next
//! ```
//!
//! The reader accepts protobuf binary and JSON text messages. Frames that
//! fail to decode are logged and skipped. Dropping the subscription aborts
//! the reader, which closes the socket.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::time::Duration;

use frames::{Frame, Namespace};
use futures_util::StreamExt;
use reqwest::header::{COOKIE, HeaderValue};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::ConsoleError;

const CHANNEL_CAPACITY: usize = 256;

pub struct FeedSubscription {
    namespace: Namespace,
    frames: mpsc::Receiver<Frame>,
    reader: JoinHandle<()>,
}

impl FeedSubscription {
    /// Open `namespace` on the configured server.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Timeout`] when the handshake exceeds the connect
    /// timeout, [`ConsoleError::WsConnect`] when it fails.
    pub async fn connect(settings: &Settings, namespace: Namespace) -> Result<Self, ConsoleError> {
        let url = settings.ws_url(namespace);
        let mut request = url.as_str().into_client_request()?;
        if let Some(token) = settings.session_token.as_deref() {
            request
                .headers_mut()
                .insert(COOKIE, HeaderValue::from_str(&format!("session_token={token}"))?);
        }

        let (stream, _) = tokio::time::timeout(settings.connect_timeout, connect_async(request))
            .await
            .map_err(|_| ConsoleError::Timeout("websocket handshake"))??;
        info!(namespace = namespace.label(), %url, "push channel open");

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let reader = tokio::spawn(async move {
            let mut stream = stream;
            while let Some(message) = stream.next().await {
                let decoded = match message {
                    Ok(Message::Binary(bytes)) => frames::decode_frame(&bytes),
                    Ok(Message::Text(text)) => frames::decode_text_frame(text.as_str()),
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "push channel read failed");
                        break;
                    }
                };
                match decoded {
                    Ok(frame) => {
                        debug!(event = %frame.event, "frame");
                        if tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "skipping undecodable frame"),
                }
            }
        });

        Ok(Self {
            namespace,
            frames: rx,
            reader,
        })
    }

    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Next frame, waiting at most `timeout` when one is given.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::WsClosed`] once the socket has closed,
    /// [`ConsoleError::Timeout`] when nothing arrives in time.
    pub async fn next(&mut self, timeout: Option<Duration>) -> Result<Frame, ConsoleError> {
        let frame = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.frames.recv())
                .await
                .map_err(|_| ConsoleError::Timeout("push frame"))?,
            None => self.frames.recv().await,
        };
        frame.ok_or(ConsoleError::WsClosed)
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
