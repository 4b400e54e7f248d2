//! # client
//!
//! Leptos single-page application for the document-processing admin suite.
//!
//! Screens are thin: list/filter/paging, form validation, optimistic toggles
//! and live-feed folding all live in the `records` crate, and the annotation
//! editor lives in `layout`. This crate wires those to the DOM, the REST
//! surface and the push channel.
//!
//! Browser-only code (HTTP, websockets, file reading, canvas) is gated behind
//! the `csr` feature so the state modules test natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Root component, navigation and routes |
//! | [`pages`] | Route-level screens |
//! | [`components`] | Generic table, form, dialogs and alerts |
//! | [`state`] | Browser-independent screen state |
//! | [`net`] | REST calls and push-channel subscriptions |
//! | [`util`] | Upload classification and PDF bridging |

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("docflow admin starting");
    leptos::mount::mount_to_body(app::App);
}
