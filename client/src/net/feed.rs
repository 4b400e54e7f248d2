//! Push-channel subscriptions scoped to a widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! A live screen calls [`subscribe`] on mount and keeps the returned
//! [`Subscription`] until `on_cleanup`. Two local tasks run per subscription:
//!
//! ```text
//! websocket ──decode──► mpsc channel ──► update loop ──► on_frame(frame)
//! ```
//!
//! Dropping the subscription fires its cancel channel: the socket task ends,
//! the socket closes, the channel sender drops and the update loop drains out.
//! No listener outlives the widget.
//!
//! ERROR HANDLING
//! ==============
//! Undecodable frames are logged and skipped. Socket failures are reported
//! through `on_status`; the logs namespace reconnects with backoff, the
//! processing namespace does not (a new socket means a new session).

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use frames::{Frame, Namespace};

/// Connection state surfaced to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Connecting,
    Live,
    /// Dropped; a reconnect is scheduled.
    Retrying,
    /// Dropped for good.
    Closed,
}

impl FeedStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Live => "live",
            Self::Retrying => "reconnecting",
            Self::Closed => "disconnected",
        }
    }
}

/// Websocket URL for `namespace` given the page's protocol and host.
#[must_use]
pub fn ws_url(page_protocol: &str, host: &str, namespace: Namespace) -> String {
    let scheme = if page_protocol.starts_with("https") { "wss" } else { "ws" };
    format!("{scheme}://{host}{}", namespace.path())
}

pub const INITIAL_BACKOFF_MS: u32 = 1000;
pub const MAX_BACKOFF_MS: u32 = 10_000;

/// Next reconnect delay: doubles up to `max_ms`.
#[must_use]
pub fn next_backoff(current_ms: u32, max_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(max_ms)
}

/// Delay before reconnecting. A socket that delivered frames was healthy, so
/// the backoff starts over.
#[must_use]
pub fn reconnect_delay(backoff_ms: u32, delivered: bool) -> u32 {
    if delivered { INITIAL_BACKOFF_MS } else { backoff_ms }
}

/// Decode a text or binary websocket payload.
///
/// # Errors
///
/// Returns the codec error for malformed payloads.
pub fn decode_payload(payload: Payload<'_>) -> Result<Frame, frames::CodecError> {
    match payload {
        Payload::Text(text) => frames::decode_text_frame(text),
        Payload::Binary(bytes) => frames::decode_frame(bytes),
    }
}

/// Borrowed websocket message body.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Text(&'a str),
    Binary(&'a [u8]),
}

/// Live subscription handle. Dropping it tears the socket down.
#[derive(Debug, Default)]
pub struct Subscription {
    #[cfg(feature = "csr")]
    cancel: Option<futures::channel::oneshot::Sender<()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        #[cfg(feature = "csr")]
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

/// Open a subscription to `namespace`.
///
/// `on_frame` runs on the update loop for every decoded frame, in arrival
/// order. `on_status` reports connection changes.
pub fn subscribe<F, S>(namespace: Namespace, reconnect: bool, on_frame: F, on_status: S) -> Subscription
where
    F: Fn(Frame) + 'static,
    S: Fn(FeedStatus) + 'static,
{
    #[cfg(feature = "csr")]
    {
        use futures::StreamExt;
        use futures::channel::{mpsc, oneshot};

        let (frame_tx, mut frame_rx) = mpsc::unbounded::<Frame>();
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        leptos::task::spawn_local(async move {
            let reader = Box::pin(socket_loop(namespace, reconnect, frame_tx, on_status));
            futures::future::select(reader, cancel_rx).await;
        });
        leptos::task::spawn_local(async move {
            while let Some(frame) = frame_rx.next().await {
                on_frame(frame);
            }
        });

        Subscription { cancel: Some(cancel_tx) }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (namespace, reconnect, on_frame);
        on_status(FeedStatus::Closed);
        Subscription::default()
    }
}

#[cfg(feature = "csr")]
async fn socket_loop<S: Fn(FeedStatus)>(
    namespace: Namespace,
    reconnect: bool,
    tx: futures::channel::mpsc::UnboundedSender<Frame>,
    on_status: S,
) {
    let mut backoff_ms = INITIAL_BACKOFF_MS;
    loop {
        on_status(FeedStatus::Connecting);
        let url = page_ws_url(namespace);
        let mut delivered = false;
        match run_socket(&url, &tx, &on_status, &mut delivered).await {
            Ok(()) => log::info!("{} feed closed", namespace.label()),
            Err(e) => leptos::logging::warn!("{} feed error: {e}", namespace.label()),
        }
        if !reconnect || tx.is_closed() {
            on_status(FeedStatus::Closed);
            return;
        }
        on_status(FeedStatus::Retrying);
        let delay_ms = reconnect_delay(backoff_ms, delivered);
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(delay_ms))).await;
        backoff_ms = next_backoff(delay_ms, MAX_BACKOFF_MS);
    }
}

#[cfg(feature = "csr")]
fn page_ws_url(namespace: Namespace) -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_default();
    let host = location
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    ws_url(&protocol, &host, namespace)
}

#[cfg(feature = "csr")]
async fn run_socket<S: Fn(FeedStatus)>(
    url: &str,
    tx: &futures::channel::mpsc::UnboundedSender<Frame>,
    on_status: &S,
    delivered: &mut bool,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let mut ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    on_status(FeedStatus::Live);

    while let Some(msg) = ws.next().await {
        *delivered |= msg.is_ok();
        let decoded = match &msg {
            Ok(Message::Text(text)) => decode_payload(Payload::Text(text)),
            Ok(Message::Bytes(bytes)) => decode_payload(Payload::Binary(bytes)),
            Err(e) => return Err(e.to_string()),
        };
        match decoded {
            Ok(frame) => {
                if tx.unbounded_send(frame).is_err() {
                    return Ok(());
                }
            }
            Err(e) => leptos::logging::warn!("dropping undecodable frame: {e}"),
        }
    }
    Ok(())
}
