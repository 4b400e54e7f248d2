use super::*;

fn sample_frame() -> Frame {
    Frame {
        id: "id-1".to_owned(),
        parent_id: Some("parent-1".to_owned()),
        ts: 42,
        session_id: Some("sess-1".to_owned()),
        from: Some("system".to_owned()),
        event: "transaction_log:updated".to_owned(),
        status: Status::Done,
        data: serde_json::json!({
            "x": 1.25,
            "ok": true,
            "tags": ["a", "b"],
            "nested": {"k": "v"},
            "nil": null
        }),
    }
}

#[test]
fn status_numeric_mapping_matches_wire_enum() {
    assert_eq!(Status::Request.as_i32(), 0);
    assert_eq!(Status::Done.as_i32(), 1);
    assert_eq!(Status::Error.as_i32(), 2);
}

#[test]
fn status_from_wire_rejects_out_of_range_value() {
    let err = Status::from_i32(99).expect_err("status should be invalid");
    assert!(matches!(err, CodecError::InvalidStatus(99)));
}

#[test]
fn encode_decode_preserves_frame() {
    let frame = sample_frame();
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode should succeed");
    assert_eq!(decoded, frame);
}

#[test]
fn decode_frame_rejects_malformed_bytes() {
    let err = decode_frame(&[0xff, 0x00, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_frame_rejects_invalid_wire_status() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        parent_id: None,
        ts: 1,
        session_id: None,
        from: None,
        event: "system_log:created".to_owned(),
        status: 77,
        data: Some(json_to_proto_value(&serde_json::json!({}))),
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let err = decode_frame(&bytes).expect_err("status should fail");
    assert!(matches!(err, CodecError::InvalidStatus(77)));
}

#[test]
fn decode_frame_defaults_missing_data_to_empty_object() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        parent_id: None,
        ts: 1,
        session_id: None,
        from: None,
        event: SESSION_CONNECTED.to_owned(),
        status: Status::Done.as_i32(),
        data: None,
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let frame = decode_frame(&bytes).expect("decode");
    assert_eq!(frame.data, serde_json::json!({}));
}

#[test]
fn decode_frame_converts_nan_number_to_json_null() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        parent_id: None,
        ts: 1,
        session_id: None,
        from: None,
        event: "billing_log:created".to_owned(),
        status: Status::Done.as_i32(),
        data: Some(prost_types::Value {
            kind: Some(prost_types::value::Kind::NumberValue(f64::NAN)),
        }),
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let frame = decode_frame(&bytes).expect("decode");
    assert_eq!(frame.data, Value::Null);
}

#[test]
fn whole_numbers_come_back_as_integers() {
    let frame = Frame::push("f-1", "client_log:deleted", serde_json::json!({ "id": 17 }));
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data.get("id").and_then(Value::as_i64), Some(17));
}

#[test]
fn fractional_numbers_stay_floating_point() {
    let frame = Frame::push("f-1", "billing_log:created", serde_json::json!({ "ratio": 0.5 }));
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data.get("ratio").and_then(Value::as_f64), Some(0.5));
}

#[test]
fn text_codec_accepts_minimal_json() {
    let frame = decode_text_frame(r#"{"id":"a","event":"system_log:created","status":"done"}"#).expect("decode");
    assert_eq!(frame.event, "system_log:created");
    assert_eq!(frame.status, Status::Done);
    assert_eq!(frame.data, serde_json::json!({}));
    assert!(frame.session_id.is_none());
}

#[test]
fn text_codec_round_trips_sample() {
    let frame = sample_frame();
    let text = encode_text_frame(&frame).expect("encode");
    assert_eq!(decode_text_frame(&text).expect("decode"), frame);
}

#[test]
fn text_codec_rejects_garbage() {
    assert!(matches!(decode_text_frame("not json"), Err(CodecError::Json(_))));
}

#[test]
fn event_parts_split_on_last_separator() {
    assert_eq!(event_parts("transaction_log:created"), ("transaction_log", "created"));
    assert_eq!(event_parts("session:connected"), ("session", "connected"));
    assert_eq!(event_parts("ping"), ("ping", ""));
}

#[test]
fn topic_and_verb_accessors_use_event_name() {
    let frame = sample_frame();
    assert_eq!(frame.topic(), "transaction_log");
    assert_eq!(frame.verb(), "updated");
}

#[test]
fn connected_session_id_prefers_payload() {
    let frame = Frame::push("c", SESSION_CONNECTED, serde_json::json!({ "session_id": "abc" }));
    assert_eq!(frame.connected_session_id(), Some("abc"));

    let fallback = Frame::push("c", SESSION_CONNECTED, serde_json::json!({})).with_session_id("xyz");
    assert_eq!(fallback.connected_session_id(), Some("xyz"));
}

#[test]
fn connected_session_id_ignores_other_events() {
    let frame = Frame::push("c", "processing:result", serde_json::json!({ "session_id": "abc" }));
    assert_eq!(frame.connected_session_id(), None);
}

#[test]
fn error_message_only_for_error_frames() {
    let mut frame = Frame::push("e", "processing:result", serde_json::json!({ "message": "denied" }));
    assert_eq!(frame.error_message(), None);
    frame.status = Status::Error;
    assert_eq!(frame.error_message(), Some("denied"));
    frame.data = serde_json::json!({});
    assert_eq!(frame.error_message(), Some("unknown push-channel error"));
}

#[test]
fn namespace_paths_are_distinct() {
    assert_eq!(Namespace::Processing.path(), "/ws/processing");
    assert_eq!(Namespace::Logs.path(), "/ws/logs");
    assert_ne!(Namespace::Processing.label(), Namespace::Logs.label());
}

#[test]
fn status_serializes_as_lowercase_json() {
    assert_eq!(serde_json::to_string(&Status::Request).expect("serialize"), "\"request\"");
    assert_eq!(serde_json::to_string(&Status::Error).expect("serialize"), "\"error\"");
}

#[test]
fn status_rejects_non_lowercase_json() {
    assert!(serde_json::from_str::<Status>("\"Error\"").is_err());
}
