use axum::http::header;
use axum::routing::get;

use super::*;
use crate::test_support::{settings, spawn};

#[test]
fn extension_follows_content_type() {
    assert_eq!(extension("image/png"), "png");
    assert_eq!(extension("image/jpeg; charset=binary"), "jpg");
    assert_eq!(extension("text/plain"), "bin");
    assert_eq!(default_path(4, "image/webp"), PathBuf::from("layout-4.webp"));
}

#[test]
fn missing_dimensions_are_reported_as_such() {
    let image = ImageDownload {
        bytes: Vec::new(),
        content_type: "image/png".to_owned(),
        width: Some(10),
        height: None,
    };
    assert_eq!(dimensions_text(&image), "dimensions not reported");
}

#[tokio::test]
async fn image_is_written_to_the_requested_path() {
    let router = axum::Router::new().route(
        &DocumentLayout::image_path(5),
        get(|| async {
            (
                [
                    (header::CONTENT_TYPE, "image/jpeg"),
                    (header::HeaderName::from_static(DocumentLayout::WIDTH_HEADER), "800"),
                    (header::HeaderName::from_static(DocumentLayout::HEIGHT_HEADER), "1131"),
                ],
                vec![0xFF_u8, 0xD8, 0xFF],
            )
        }),
    );
    let base = spawn(router).await;
    let client = RestClient::new(&settings(&base)).expect("client");
    let out = std::env::temp_dir().join(format!("docflow-layout-{}.jpg", std::process::id()));

    let (path, image) = download_image(&client, 5, Some(out.clone())).await.expect("download");
    assert_eq!(path, out);
    assert_eq!(dimensions_text(&image), "800×1131");
    assert_eq!(std::fs::read(&out).expect("written file"), vec![0xFF, 0xD8, 0xFF]);
    std::fs::remove_file(&out).expect("cleanup");
}

#[tokio::test]
async fn missing_layout_is_a_status_error() {
    let base = spawn(axum::Router::new()).await;
    let client = RestClient::new(&settings(&base)).expect("client");

    let err = download_image(&client, 404, None).await.expect_err("no route");
    assert!(matches!(err, ConsoleError::Api(records::ApiError::Status { status: 404, .. })));
}
