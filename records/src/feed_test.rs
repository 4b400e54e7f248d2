use super::*;
use crate::logs::{LogLevel, RemoteTransactionLog, SystemLog, TransactionStatus};
use serde_json::json;

fn log(id: RecordId, minute: u32, message: &str) -> SystemLog {
    SystemLog {
        id,
        level: LogLevel::Info,
        component: "scheduler".to_owned(),
        message: message.to_owned(),
        created_at: format!("2024-05-01T10:{minute:02}:00Z").parse().expect("timestamp"),
    }
}

fn ids(list: &LiveList<SystemLog>) -> Vec<RecordId> {
    list.rows().iter().map(|r| r.id).collect()
}

// =============================================================================
// LiveList
// =============================================================================

#[test]
fn fetch_is_sorted_newest_first() {
    let list = LiveList::from_fetch(vec![log(1, 1, "a"), log(2, 5, "b"), log(3, 3, "c")]);
    assert_eq!(ids(&list), vec![2, 3, 1]);
}

#[test]
fn created_prepends_and_resorts() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a"), log(2, 5, "b")]);
    assert!(list.apply(FeedEvent::Created(log(3, 9, "c"))));
    assert_eq!(ids(&list), vec![3, 2, 1]);

    // Late arrival with an older timestamp lands in order.
    list.apply(FeedEvent::Created(log(4, 2, "d")));
    assert_eq!(ids(&list), vec![3, 2, 4, 1]);
}

#[test]
fn created_with_existing_id_replaces_instead_of_duplicating() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a"), log(2, 5, "b")]);
    list.apply(FeedEvent::Created(log(1, 7, "a again")));
    assert_eq!(ids(&list), vec![1, 2]);
    assert_eq!(list.rows()[0].message, "a again");
}

#[test]
fn created_ties_keep_newest_arrival_first() {
    let mut list = LiveList::from_fetch(vec![log(1, 5, "a")]);
    list.apply(FeedEvent::Created(log(2, 5, "b")));
    assert_eq!(ids(&list), vec![2, 1]);
}

#[test]
fn updated_replaces_in_place_without_reordering() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a"), log(2, 5, "b")]);
    assert!(list.apply(FeedEvent::Updated(log(1, 9, "edited"))));
    assert_eq!(ids(&list), vec![2, 1]);
    assert_eq!(list.rows()[1].message, "edited");
}

#[test]
fn updated_unknown_id_is_noop() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a")]);
    assert!(!list.apply(FeedEvent::Updated(log(99, 2, "ghost"))));
    assert_eq!(ids(&list), vec![1]);
}

#[test]
fn deleted_removes_exactly_that_id() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a"), log(2, 5, "b"), log(3, 3, "c")]);
    assert!(list.apply(FeedEvent::Deleted(3)));
    assert_eq!(ids(&list), vec![2, 1]);
    assert!(!list.apply(FeedEvent::Deleted(3)));
    assert_eq!(list.len(), 2);
}

// =============================================================================
// Holding events across a fetch
// =============================================================================

#[test]
fn events_racing_the_fetch_replay_in_arrival_order() {
    let mut list = LiveList::awaiting_fetch();
    assert!(list.is_holding());
    assert!(!list.apply(FeedEvent::Created(log(3, 9, "c"))));
    assert!(!list.apply(FeedEvent::Updated(log(1, 1, "a edited"))));
    assert!(!list.apply(FeedEvent::Deleted(2)));
    assert!(list.is_empty());

    list.seed(vec![log(1, 1, "a"), log(2, 5, "b")]);
    assert!(!list.is_holding());
    assert_eq!(ids(&list), vec![3, 1]);
    assert_eq!(list.rows()[1].message, "a edited");
}

#[test]
fn refetch_after_reconnect_replaces_rows_and_keeps_later_events() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a"), log(2, 5, "b")]);
    list.hold();
    list.apply(FeedEvent::Deleted(1));
    assert_eq!(ids(&list), vec![2, 1]);

    // Row 4 was created while the socket was down; the refetch brings it in.
    list.seed(vec![log(1, 1, "a"), log(2, 5, "b"), log(4, 7, "d")]);
    assert_eq!(ids(&list), vec![4, 2]);
}

#[test]
fn release_without_fetch_applies_held_events_over_current_rows() {
    let mut list = LiveList::from_fetch(vec![log(1, 1, "a")]);
    list.hold();
    list.apply(FeedEvent::Created(log(2, 4, "b")));
    list.release();
    assert!(!list.is_holding());
    assert_eq!(ids(&list), vec![2, 1]);
}

// =============================================================================
// Frame decoding
// =============================================================================

fn system_log_json(id: RecordId) -> serde_json::Value {
    json!({
        "id": id,
        "level": "warn",
        "component": "ocr",
        "message": "slow page",
        "created_at": "2024-05-01T10:00:00Z"
    })
}

#[test]
fn decodes_created_and_updated_for_own_topic() {
    let frame = Frame::push("f", "system_log:created", system_log_json(5));
    let event = decode_feed_event::<SystemLog>(&frame).expect("decode");
    assert!(matches!(event, Some(FeedEvent::Created(ref l)) if l.id == 5 && l.level == LogLevel::Warn));

    let frame = Frame::push("f", "system_log:updated", system_log_json(5));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Ok(Some(FeedEvent::Updated(_)))));
}

#[test]
fn decodes_deleted_id_from_object_or_bare_number() {
    let frame = Frame::push("f", "system_log:deleted", json!({ "id": 8 }));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Ok(Some(FeedEvent::Deleted(8)))));

    let frame = Frame::push("f", "system_log:deleted", json!(9));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Ok(Some(FeedEvent::Deleted(9)))));

    let frame = Frame::push("f", "system_log:deleted", json!({}));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Err(FeedError::MissingId)));
}

#[test]
fn other_topics_and_error_frames_are_ignored() {
    let frame = Frame::push("f", "transaction_log:created", system_log_json(5));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Ok(None)));

    let mut frame = Frame::push("f", "system_log:created", json!({ "message": "denied" }));
    frame.status = frames::Status::Error;
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Ok(None)));
}

#[test]
fn unknown_verb_and_bad_payload_are_errors() {
    let frame = Frame::push("f", "system_log:archived", system_log_json(5));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Err(FeedError::UnknownVerb(v)) if v == "archived"));

    let frame = Frame::push("f", "system_log:created", json!({ "id": "nope" }));
    assert!(matches!(decode_feed_event::<SystemLog>(&frame), Err(FeedError::Payload(_))));
}

#[test]
fn binary_round_trip_keeps_record_ids_usable() {
    let frame = Frame::push(
        "f",
        "transaction_log:created",
        json!({
            "id": 77,
            "initiator_key": "key-a",
            "app_instance_id": 3,
            "status": "completed",
            "message": "",
            "created_at": "2024-05-01T10:00:00Z"
        }),
    );
    let decoded = frames::decode_frame(&frames::encode_frame(&frame)).expect("decode");
    let event = decode_feed_event::<RemoteTransactionLog>(&decoded).expect("event");
    assert!(matches!(
        event,
        Some(FeedEvent::Created(ref l)) if l.id == 77 && l.status == TransactionStatus::Completed
    ));
}
