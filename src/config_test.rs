use super::*;

// =============================================================================
// Settings::new
// =============================================================================

#[test]
fn trailing_slash_is_trimmed() {
    let settings = Settings::new("http://localhost:3000/", None).expect("valid url");
    assert_eq!(settings.base_url, "http://localhost:3000");
}

#[test]
fn non_http_base_url_is_rejected() {
    let err = Settings::new("ftp://example.com", None).expect_err("must reject");
    assert!(matches!(err, ConsoleError::InvalidBaseUrl(url) if url == "ftp://example.com"));
}

#[test]
fn blank_session_token_is_dropped() {
    let settings = Settings::new("http://localhost", Some("  ".to_owned())).expect("valid url");
    assert!(settings.session_token.is_none());
}

// =============================================================================
// ws_url
// =============================================================================

#[test]
fn ws_url_follows_scheme() {
    let plain = Settings::new("http://example.com:8080", None).expect("valid url");
    assert_eq!(plain.ws_url(Namespace::Logs), "ws://example.com:8080/ws/logs");

    let secure = Settings::new("https://example.com", None).expect("valid url");
    assert_eq!(secure.ws_url(Namespace::Processing), "wss://example.com/ws/processing");
}

// =============================================================================
// env_parse_u64
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    assert_eq!(env_parse_u64("DOCFLOW_TEST_SURELY_UNSET_KEY", 7), 7);
}
