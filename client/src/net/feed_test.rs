use super::*;
use frames::{Status, encode_frame, encode_text_frame};
use serde_json::json;

#[test]
fn ws_url_follows_page_scheme() {
    assert_eq!(ws_url("https:", "admin.example.com", Namespace::Logs), "wss://admin.example.com/ws/logs");
    assert_eq!(ws_url("http:", "localhost:8080", Namespace::Processing), "ws://localhost:8080/ws/processing");
}

#[test]
fn backoff_doubles_until_cap() {
    assert_eq!(next_backoff(1000, 10_000), 2000);
    assert_eq!(next_backoff(8000, 10_000), 10_000);
    assert_eq!(next_backoff(u32::MAX, 10_000), 10_000);
}

#[test]
fn backoff_starts_over_after_a_socket_that_delivered() {
    assert_eq!(reconnect_delay(8000, true), INITIAL_BACKOFF_MS);
    assert_eq!(reconnect_delay(8000, false), 8000);

    // Refused connections keep growing toward the cap.
    let mut delay = INITIAL_BACKOFF_MS;
    for _ in 0..6 {
        delay = next_backoff(reconnect_delay(delay, false), MAX_BACKOFF_MS);
    }
    assert_eq!(delay, MAX_BACKOFF_MS);
    assert_eq!(next_backoff(reconnect_delay(delay, true), MAX_BACKOFF_MS), 2 * INITIAL_BACKOFF_MS);
}

#[test]
fn payloads_decode_in_both_encodings() {
    let frame = Frame::push("f1", "client_log:deleted", json!({ "id": 12 }));
    let text = encode_text_frame(&frame).expect("encode text");
    let bytes = encode_frame(&frame);

    let from_text = decode_payload(Payload::Text(&text)).expect("text frame");
    let from_binary = decode_payload(Payload::Binary(&bytes)).expect("binary frame");
    assert_eq!(from_text.event, "client_log:deleted");
    assert_eq!(from_binary.status, Status::Done);
    assert_eq!(from_binary.data["id"].as_i64(), Some(12));
}

#[test]
fn malformed_payload_is_an_error() {
    assert!(decode_payload(Payload::Text("{not json")).is_err());
}

#[test]
fn status_labels_are_distinct() {
    let labels = [
        FeedStatus::Connecting,
        FeedStatus::Live,
        FeedStatus::Retrying,
        FeedStatus::Closed,
    ]
    .map(FeedStatus::label);
    for (i, a) in labels.iter().enumerate() {
        assert!(labels[i + 1..].iter().all(|b| a != b));
    }
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_subscribe_reports_closed() {
    let seen = std::rc::Rc::new(std::cell::Cell::new(FeedStatus::Connecting));
    let sink = seen.clone();
    let _sub = subscribe(Namespace::Logs, true, |_| {}, move |s| sink.set(s));
    assert_eq!(seen.get(), FeedStatus::Closed);
}
