use super::*;
use frames::{SESSION_CONNECTED, Status};
use serde_json::json;

fn connected(session_id: &str) -> Frame {
    Frame::push("c", SESSION_CONNECTED, json!({ "session_id": session_id }))
}

fn result_for(session_id: &str, status: &str) -> Frame {
    Frame::push(
        "r",
        RESULT_EVENT,
        json!({ "session_id": session_id, "status": status, "message": "done", "transaction_id": 12 }),
    )
    .with_session_id(session_id)
}

fn command() -> RemoteCommand {
    RemoteCommand {
        initiator_key: " key-a ".to_owned(),
        app_instance_id: 7,
        device_id: Some(2),
        document_type_id: None,
    }
}

#[test]
fn begin_before_connected_is_rejected() {
    let mut session = RemoteSession::new();
    assert_eq!(session.begin(command()), Err(RemoteError::NotConnected));
    assert_eq!(session.phase(), &SessionPhase::Connecting);
}

#[test]
fn connected_frame_records_session_id() {
    let mut session = RemoteSession::new();
    assert!(session.observe(&connected("s-1")));
    assert_eq!(session.session_id(), Some("s-1"));
    // A second announcement does not replace the first.
    assert!(!session.observe(&connected("s-2")));
    assert_eq!(session.session_id(), Some("s-1"));
}

#[test]
fn begin_builds_request_with_session_id() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    let request = session.begin(command()).expect("request");
    assert_eq!(request.session_id, "s-1");
    assert_eq!(request.initiator_key, "key-a");
    let body = serde_json::to_value(&request).expect("serialize");
    assert!(body.get("document_type_id").is_none());
    assert_eq!(body["device_id"], 2);
    assert!(matches!(session.phase(), SessionPhase::Awaiting { .. }));
    assert_eq!(session.begin(command()), Err(RemoteError::Busy));
}

#[test]
fn invalid_command_leaves_session_ready() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    let err = session
        .begin(RemoteCommand {
            initiator_key: String::new(),
            app_instance_id: 0,
            ..RemoteCommand::default()
        })
        .expect_err("invalid");
    let RemoteError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.for_field("initiator_key").is_some());
    assert!(errors.for_field("app_instance_id").is_some());
    assert!(matches!(session.phase(), SessionPhase::Ready { .. }));
}

#[test]
fn result_for_other_session_is_ignored() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    session.begin(command()).expect("request");
    assert!(!session.observe(&result_for("s-other", "completed")));
    assert!(!session.is_finished());
}

#[test]
fn matching_result_completes() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    session.begin(command()).expect("request");
    assert!(session.observe(&result_for("s-1", "completed")));
    let SessionPhase::Completed(result) = session.phase() else {
        panic!("expected completion");
    };
    assert!(result.succeeded());
    assert_eq!(result.transaction_id, Some(12));
}

#[test]
fn result_session_can_come_from_payload_only() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    session.begin(command()).expect("request");
    let frame = Frame::push("r", RESULT_EVENT, json!({ "session_id": "s-1", "status": "failed" }));
    assert!(session.observe(&frame));
    assert!(session.is_finished());
}

#[test]
fn error_frame_fails_the_session() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    session.begin(command()).expect("request");
    let mut frame = Frame::push("r", RESULT_EVENT, json!({ "message": "initiator key revoked" })).with_session_id("s-1");
    frame.status = Status::Error;
    assert!(session.observe(&frame));
    assert_eq!(session.phase(), &SessionPhase::Failed("initiator key revoked".to_owned()));
}

#[test]
fn abort_only_applies_while_awaiting() {
    let mut session = RemoteSession::new();
    session.abort("ignored");
    assert_eq!(session.phase(), &SessionPhase::Connecting);

    session.observe(&connected("s-1"));
    session.begin(command()).expect("request");
    session.abort("POST failed");
    assert_eq!(session.phase(), &SessionPhase::Failed("POST failed".to_owned()));
}

#[test]
fn finished_session_can_start_again() {
    let mut session = RemoteSession::new();
    session.observe(&connected("s-1"));
    session.begin(command()).expect("request");
    session.observe(&result_for("s-1", "completed"));
    let again = session.begin(command()).expect("second request");
    assert_eq!(again.session_id, "s-1");
}

#[test]
fn command_validation_needs_no_session() {
    let blank = RemoteCommand::default();
    let errors = blank.validate().expect_err("blank command");
    assert!(errors.for_field("initiator_key").is_some());
    assert!(errors.for_field("app_instance_id").is_some());
    assert!(command().validate().is_ok());
}
