//! Classify files chosen for the layout editor.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

/// How an uploaded file becomes the editor background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// First page rendered to an off-screen canvas.
    Pdf,
    /// Decoded as an `<img>`.
    Image,
    Unsupported,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Decide by MIME type, falling back to the file extension when the browser
/// reports none.
#[must_use]
pub fn classify(file_name: &str, mime: &str) -> UploadKind {
    let mime = mime.trim().to_ascii_lowercase();
    if mime == "application/pdf" {
        return UploadKind::Pdf;
    }
    if mime.starts_with("image/") {
        return UploadKind::Image;
    }
    if !mime.is_empty() && mime != "application/octet-stream" {
        return UploadKind::Unsupported;
    }
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ext == "pdf" {
        UploadKind::Pdf
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        UploadKind::Image
    } else {
        UploadKind::Unsupported
    }
}

/// MIME type sent with the image upload.
#[must_use]
pub fn upload_content_type(kind: UploadKind, mime: &str) -> String {
    match kind {
        UploadKind::Pdf => "application/pdf".to_owned(),
        _ if !mime.trim().is_empty() => mime.trim().to_owned(),
        _ => "application/octet-stream".to_owned(),
    }
}
