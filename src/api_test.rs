use axum::Json;
use axum::http::{HeaderMap as AxumHeaders, StatusCode, header};
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::test_support::{settings, spawn};

async fn client_for(router: axum::Router) -> RestClient {
    let base = spawn(router).await;
    RestClient::new(&settings(&base)).expect("client")
}

// =============================================================================
// Pure helpers
// =============================================================================

#[test]
fn empty_body_decodes_to_none() {
    let decoded: Option<Value> = decode_body("  ").expect("empty is fine");
    assert!(decoded.is_none());
}

#[test]
fn malformed_body_is_decode_error() {
    let err = decode_body::<Value>("{oops").expect_err("must fail");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn zero_or_garbage_dimension_is_none() {
    assert_eq!(dimension_header(Some("640".to_owned())), Some(640));
    assert_eq!(dimension_header(Some("0".to_owned())), None);
    assert_eq!(dimension_header(Some("wide".to_owned())), None);
    assert_eq!(dimension_header(None), None);
}

// =============================================================================
// Against a live server
// =============================================================================

#[tokio::test]
async fn list_forwards_session_cookie() {
    let router = axum::Router::new().route(
        "/api/document-types",
        get(|headers: AxumHeaders| async move {
            let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_owned();
            Json(json!([{ "cookie": cookie }]))
        }),
    );
    let client = client_for(router).await;

    let rows: Vec<Value> = client.list("/api/document-types").await.expect("list");
    assert_eq!(rows, vec![json!({ "cookie": "session_token=test-token" })]);
}

#[tokio::test]
async fn status_error_keeps_server_message() {
    let router = axum::Router::new().route(
        "/api/access-rights/7",
        get(|| async { (StatusCode::CONFLICT, Json(json!({ "message": "token in use" }))) }),
    );
    let client = client_for(router).await;

    let err = client.get::<Value>("/api/access-rights/7").await.expect_err("must fail");
    assert_eq!(
        err,
        ApiError::Status {
            status: 409,
            message: Some("token in use".to_owned())
        }
    );
}

#[tokio::test]
async fn post_with_empty_response_returns_none() {
    let router = axum::Router::new().route("/api/ai-providers", axum::routing::post(|| async { StatusCode::CREATED }));
    let client = client_for(router).await;

    let created: Option<Value> = client.post("/api/ai-providers", &json!({ "name": "x" })).await.expect("post");
    assert!(created.is_none());
}

#[tokio::test]
async fn image_download_reads_dimension_headers() {
    let router = axum::Router::new().route(
        "/api/document-layouts/3/image",
        get(|| async {
            (
                [
                    (header::CONTENT_TYPE, "image/png"),
                    (header::HeaderName::from_static("x-image-width"), "1240"),
                    (header::HeaderName::from_static("x-image-height"), "1754"),
                ],
                vec![1_u8, 2, 3],
            )
        }),
    );
    let client = client_for(router).await;

    let image = client
        .fetch_image("/api/document-layouts/3/image", "x-image-width", "x-image-height")
        .await
        .expect("image");
    assert_eq!(image.bytes, vec![1, 2, 3]);
    assert_eq!(image.content_type, "image/png");
    assert_eq!((image.width, image.height), (Some(1240), Some(1754)));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = RestClient::new(&settings("http://127.0.0.1:9")).expect("client");
    let err = client.list::<Value>("/api/system-logs").await.expect_err("must fail");
    assert!(matches!(err, ApiError::Transport(_)));
}
