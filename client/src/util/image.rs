//! Layout background images: decoding and coordinate space.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use layout::consts::MAX_DISPLAY_WIDTH;
use layout::geometry::ImageFit;

/// Coordinate space for a stored layout image.
///
/// Regions were drawn in the stored display size. The response headers win,
/// then the dimensions stored on the layout, then a fresh fit to the maximum
/// display width.
#[must_use]
pub fn stored_fit(
    natural_width: f64,
    natural_height: f64,
    headers: (Option<u32>, Option<u32>),
    stored: (Option<u32>, Option<u32>),
) -> ImageFit {
    let dims = match (headers, stored) {
        ((Some(w), Some(h)), _) | (_, (Some(w), Some(h))) => Some((w, h)),
        _ => None,
    };
    match dims {
        Some((w, h)) => ImageFit::with_display(natural_width, natural_height, f64::from(w), f64::from(h)),
        None => ImageFit::fit_to_width(natural_width, natural_height, MAX_DISPLAY_WIDTH),
    }
}

/// A decoded `<img>` and the object URL backing it.
#[cfg(feature = "csr")]
pub struct LoadedImage {
    pub element: web_sys::HtmlImageElement,
    /// Revoked on drop; keep it as long as the element is shown.
    pub url: gloo_file::ObjectUrl,
    pub natural_width: f64,
    pub natural_height: f64,
}

/// Decode raster bytes into an image element.
///
/// # Errors
///
/// Returns a message when the element cannot be created or the bytes do not decode.
#[cfg(feature = "csr")]
pub async fn load_image(bytes: &[u8], mime: &str) -> Result<LoadedImage, String> {
    let blob = gloo_file::Blob::new_with_options(bytes, Some(mime));
    let url = gloo_file::ObjectUrl::from(blob);
    let element = web_sys::HtmlImageElement::new().map_err(|e| super::js_error_text(&e))?;
    element.set_src(&url);
    wasm_bindgen_futures::JsFuture::from(element.decode())
        .await
        .map_err(|e| super::js_error_text(&e))?;
    let natural_width = f64::from(element.natural_width());
    let natural_height = f64::from(element.natural_height());
    Ok(LoadedImage {
        element,
        url,
        natural_width,
        natural_height,
    })
}
