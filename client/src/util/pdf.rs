//! First-page PDF rendering.
//!
//! Rasterizing PDFs is delegated to pdf.js through `js/pdf_page.js`; this
//! module only hands it the bytes and a fresh off-screen canvas. The host
//! page must load pdf.js as `window.pdfjsLib`; without it PDF uploads fail
//! with "pdf.js is not loaded" and image uploads still work.

/// Device pixels per PDF point used for the rendered page.
pub const RENDER_SCALE: f64 = 1.5;

#[cfg(feature = "csr")]
mod bridge {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(module = "/js/pdf_page.js")]
    extern "C" {
        #[wasm_bindgen(catch, js_name = renderFirstPage)]
        pub async fn render_first_page(
            data: js_sys::Uint8Array,
            canvas: &web_sys::HtmlCanvasElement,
            scale: f64,
        ) -> Result<JsValue, JsValue>;
    }
}

/// Render page 1 of `bytes` into a new canvas sized to the page.
///
/// # Errors
///
/// Returns a message when there is no document, pdf.js rejects the bytes,
/// or the rendered page is empty.
#[cfg(feature = "csr")]
pub async fn render_first_page(bytes: &[u8]) -> Result<web_sys::HtmlCanvasElement, String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document available".to_owned())?;
    let canvas = document
        .create_element("canvas")
        .map_err(|e| super::js_error_text(&e))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "created element is not a canvas".to_owned())?;
    bridge::render_first_page(js_sys::Uint8Array::from(bytes), &canvas, RENDER_SCALE)
        .await
        .map_err(|e| super::js_error_text(&e))?;
    if canvas.width() == 0 || canvas.height() == 0 {
        return Err("the PDF's first page rendered empty".to_owned());
    }
    Ok(canvas)
}
