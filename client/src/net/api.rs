//! REST helpers shared by every screen.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ApiError::Transport`] so screen state can
//! be compiled and tested without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-2xx responses keep the
//! server's JSON `message` when present; nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use records::ApiError;
use records::RecordId;
use records::resources::DocumentLayout;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "not available outside the browser";

/// Raw bytes of a layout image plus the dimensions announced in its headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Parse an image-dimension header; absent, non-numeric or zero reads as `None`.
#[cfg(any(test, feature = "csr"))]
fn dimension_header(value: Option<String>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok()).filter(|v| *v > 0)
}

/// Decode an optional JSON body. Empty bodies are `Ok(None)`.
#[cfg(any(test, feature = "csr"))]
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<Option<T>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "csr")]
async fn check(
    result: Result<gloo_net::http::Response, gloo_net::Error>,
) -> Result<gloo_net::http::Response, ApiError> {
    let resp = result.map_err(|e| ApiError::Transport(e.to_string()))?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    leptos::logging::warn!("request to {} failed with status {status}", resp.url());
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

#[cfg(feature = "csr")]
async fn read_body<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<Option<T>, ApiError> {
    let text = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    decode_body(&text)
}

/// `GET path`, decoding a JSON list.
///
/// # Errors
///
/// Transport, status or decode failure.
pub async fn fetch_list<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = check(gloo_net::http::Request::get(path).send().await).await?;
        Ok(read_body(resp).await?.unwrap_or_default())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = path;
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}

/// `GET path`, decoding one JSON record.
///
/// # Errors
///
/// Transport, status or decode failure; an empty body is a decode failure.
pub async fn fetch_one<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = check(gloo_net::http::Request::get(path).send().await).await?;
        read_body(resp)
            .await?
            .ok_or_else(|| ApiError::Decode("empty response body".to_owned()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = path;
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}

/// `POST path` with a JSON body. Returns the created record when the server echoes it.
///
/// # Errors
///
/// Transport, status or decode failure.
pub async fn create<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<Option<T>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = gloo_net::http::Request::post(path)
            .json(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let resp = check(request.send().await).await?;
        read_body(resp).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (path, serde_json::to_value(body));
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}

/// `PUT path` with a JSON body (full or partial). Returns the updated record when echoed.
///
/// # Errors
///
/// Transport, status or decode failure.
pub async fn update<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<Option<T>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = gloo_net::http::Request::put(path)
            .json(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let resp = check(request.send().await).await?;
        read_body(resp).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (path, serde_json::to_value(body));
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}

/// `PUT path` with a partial body whose response is ignored.
///
/// # Errors
///
/// Transport or status failure.
pub async fn patch(path: &str, body: &serde_json::Value) -> Result<(), ApiError> {
    update::<_, serde_json::Value>(path, body).await.map(|_| ())
}

/// `DELETE path`.
///
/// # Errors
///
/// Transport or status failure.
pub async fn delete(path: &str) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        check(gloo_net::http::Request::delete(path).send().await).await?;
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = path;
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}

/// Fetch `/api/document-layouts/{id}/image` and its dimension headers.
///
/// # Errors
///
/// Transport or status failure.
pub async fn fetch_layout_image(id: RecordId) -> Result<LayoutImage, ApiError> {
    #[cfg(feature = "csr")]
    {
        let path = DocumentLayout::image_path(id);
        let resp = check(gloo_net::http::Request::get(&path).send().await).await?;
        let headers = resp.headers();
        let width = dimension_header(headers.get(DocumentLayout::WIDTH_HEADER));
        let height = dimension_header(headers.get(DocumentLayout::HEIGHT_HEADER));
        let content_type = headers
            .get("content-type")
            .unwrap_or_else(|| "image/png".to_owned());
        let bytes = resp.binary().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(LayoutImage {
            bytes,
            content_type,
            width,
            height,
        })
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = DocumentLayout::image_path(id);
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}

/// `PUT /api/document-layouts/{id}/image` with the uploaded file bytes.
///
/// # Errors
///
/// Transport or status failure.
pub async fn upload_layout_image(id: RecordId, bytes: &[u8], content_type: &str) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let body = js_sys::Uint8Array::from(bytes);
        let request = gloo_net::http::Request::put(&DocumentLayout::image_path(id))
            .header("content-type", content_type)
            .body(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        check(request.send().await).await?;
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (DocumentLayout::image_path(id), bytes, content_type);
        Err(ApiError::Transport(UNAVAILABLE.to_owned()))
    }
}
