//! Browser-facing helpers kept out of page code.

pub mod image;
pub mod pdf;
pub mod upload;

/// Readable text for a thrown JS value.
#[cfg(feature = "csr")]
pub(crate) fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
