//! In-process server for console tests.

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::routing::{MethodRouter, get};
use frames::Frame;
use tokio::sync::broadcast;

use crate::config::Settings;

/// Publishing a frame with this event makes the push route close the socket.
pub const CLOSE_EVENT: &str = "test:close";

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test router");
    });
    format!("http://{addr}")
}

pub fn settings(base_url: &str) -> Settings {
    let mut settings = Settings::new(base_url, Some("test-token".to_owned())).expect("valid base url");
    settings.request_timeout = std::time::Duration::from_secs(5);
    settings.connect_timeout = std::time::Duration::from_secs(5);
    settings.result_timeout = std::time::Duration::from_secs(5);
    settings
}

/// Websocket route that sends `initial` (JSON text when `text`, protobuf
/// otherwise) and then forwards everything published on `later` until
/// [`CLOSE_EVENT`]. Usable on routers with any state.
pub fn push_route<S>(initial: Vec<Frame>, text: bool, later: broadcast::Sender<Frame>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(move |ws: WebSocketUpgrade| {
        let initial = initial.clone();
        let later = later.subscribe();
        async move { ws.on_upgrade(move |socket| serve_push(socket, initial, text, later)) }
    })
}

async fn serve_push(mut socket: WebSocket, initial: Vec<Frame>, text: bool, mut later: broadcast::Receiver<Frame>) {
    for frame in &initial {
        if socket.send(encode(frame, text)).await.is_err() {
            return;
        }
    }
    while let Ok(frame) = later.recv().await {
        if frame.event == CLOSE_EVENT {
            break;
        }
        if socket.send(encode(&frame, text)).await.is_err() {
            return;
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

fn encode(frame: &Frame, text: bool) -> Message {
    if text {
        Message::Text(frames::encode_text_frame(frame).expect("encode text frame").into())
    } else {
        Message::Binary(frames::encode_frame(frame).into())
    }
}
