//! REST client for the console.
//!
//! One `reqwest::Client` per invocation, carrying the session cookie as a
//! default header. Failures are mapped onto [`ApiError`] so they read the
//! same as in the browser; nothing is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use records::ApiError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::ConsoleError;

/// Body of a binary download plus the dimensions announced in its headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDownload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// # Errors
    ///
    /// Fails when the session token is not a valid header value or the
    /// TLS backend cannot be initialized.
    pub fn new(settings: &Settings) -> Result<Self, ConsoleError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = settings.session_token.as_deref() {
            headers.insert(COOKIE, HeaderValue::from_str(&format!("session_token={token}"))?);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
        })
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response, ApiError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "request");
        let request = self.http.request(method.clone(), &url);
        let request = match body {
            Some(json) => request.json(&json),
            None => request,
        };
        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        check(method, response).await
    }

    async fn send_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<Response, ApiError> {
        let json = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(method, path, Some(json)).await
    }

    /// `GET path`, decoding a JSON list. An empty body is an empty list.
    ///
    /// # Errors
    ///
    /// Transport, status or decode failure.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        Ok(read_body(response).await?.unwrap_or_default())
    }

    /// `GET path`, decoding one JSON record.
    ///
    /// # Errors
    ///
    /// Transport, status or decode failure; an empty body is a decode failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        read_body(response)
            .await?
            .ok_or_else(|| ApiError::Decode("empty response body".to_owned()))
    }

    /// `POST path`. Returns the created record when the server echoes it.
    ///
    /// # Errors
    ///
    /// Transport, status or decode failure.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError> {
        let response = self.send_json(Method::POST, path, body).await?;
        read_body(response).await
    }

    /// `PUT path` with a full or partial body. Returns the record when echoed.
    ///
    /// # Errors
    ///
    /// Transport, status or decode failure.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError> {
        let response = self.send_json(Method::PUT, path, body).await?;
        read_body(response).await
    }

    /// # Errors
    ///
    /// Transport or status failure.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await.map(drop)
    }

    /// `GET path` as raw bytes, reading `width_header`/`height_header` for dimensions.
    ///
    /// # Errors
    ///
    /// Transport or status failure.
    pub async fn fetch_image(&self, path: &str, width_header: &str, height_header: &str) -> Result<ImageDownload, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        let headers = response.headers();
        let width = dimension_header(header_text(headers, width_header));
        let height = dimension_header(header_text(headers, height_header));
        let content_type = header_text(headers, CONTENT_TYPE.as_str()).unwrap_or_else(|| "application/octet-stream".to_owned());
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ImageDownload {
            bytes: bytes.to_vec(),
            content_type,
            width,
            height,
        })
    }
}

async fn check(method: Method, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(%method, url = %response.url(), status = status.as_u16(), "request failed");
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), &body))
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    decode_body(&text)
}

/// Decode an optional JSON body. Empty bodies are `Ok(None)`.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<Option<T>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

/// Absent, non-numeric or zero reads as `None`.
fn dimension_header(value: Option<String>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok()).filter(|v| *v > 0)
}
