use super::*;

#[test]
fn from_status_lifts_json_message() {
    let err = ApiError::from_status(422, r#"{"message":"title already taken"}"#);
    assert_eq!(
        err,
        ApiError::Status {
            status: 422,
            message: Some("title already taken".to_owned())
        }
    );
    assert_eq!(err.user_message(), "title already taken");
    assert_eq!(err.to_string(), "request failed with status 422: title already taken");
}

#[test]
fn from_status_ignores_non_json_and_blank_messages() {
    let plain = ApiError::from_status(500, "Internal Server Error");
    assert_eq!(plain, ApiError::Status { status: 500, message: None });
    assert_eq!(plain.user_message(), "The server rejected the request (500).");
    assert_eq!(plain.to_string(), "request failed with status 500");

    let blank = ApiError::from_status(400, r#"{"message":"   "}"#);
    assert_eq!(blank, ApiError::Status { status: 400, message: None });
}

#[test]
fn validation_errors_convert_and_summarize() {
    let mut errors = ValidationErrors::new();
    errors.push("title", "is required");
    let err: ApiError = errors.into();
    assert!(err.is_validation());
    assert_eq!(err.user_message(), "title: is required");
}

#[test]
fn transport_and_decode_have_generic_user_messages() {
    let transport = ApiError::Transport("connection refused".to_owned());
    assert!(transport.user_message().contains("Could not reach the server"));
    assert!(transport.to_string().contains("connection refused"));

    let decode = ApiError::Decode("expected array".to_owned());
    assert_eq!(decode.user_message(), "The server sent an unexpected response.");
}
