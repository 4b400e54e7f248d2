use super::*;
use records::resources::AccessToken;

#[test]
fn dimension_header_parses_positive_integers() {
    assert_eq!(dimension_header(Some("900".to_owned())), Some(900));
    assert_eq!(dimension_header(Some(" 640 ".to_owned())), Some(640));
}

#[test]
fn dimension_header_rejects_missing_zero_and_garbage() {
    assert_eq!(dimension_header(None), None);
    assert_eq!(dimension_header(Some("0".to_owned())), None);
    assert_eq!(dimension_header(Some("wide".to_owned())), None);
}

#[test]
fn decode_body_treats_blank_as_absent() {
    let decoded: Option<AccessToken> = decode_body("  ").expect("blank body");
    assert!(decoded.is_none());
}

#[test]
fn decode_body_reads_echoed_record() {
    let decoded: Option<AccessToken> =
        decode_body(r#"{"id":4,"token":"t","name":"ci","description":"","active":true}"#).expect("record");
    let token = decoded.expect("some record");
    assert_eq!(token.id, Some(4));
    assert!(token.active);
}

#[test]
fn decode_body_reports_shape_mismatch() {
    let err = decode_body::<AccessToken>("[1,2]").expect_err("list is not a token");
    assert!(matches!(err, ApiError::Decode(_)));
}
