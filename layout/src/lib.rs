//! Annotation editor for document layouts.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing lifecycle of a layout: turning pointer events over a reference
//! image into named rectangular field regions, editing those regions through
//! a snapshot-backed edit session, and producing the persisted layout body.
//! The host page wires DOM events to the editor and sends the resulting
//! [`records::resources::LayoutDraft`] to the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Browser [`editor::Editor`] and testable [`editor::EditorCore`] |
//! | [`annotation`] | Annotation model and conversion to persisted fields |
//! | [`geometry`] | Points, signed rectangles, image fitting |
//! | [`input`] | Pointer buttons and the gesture state machine |
//! | [`hit`] | Resize handles and hit-testing of the edited region |
//! | [`render`] | Canvas 2D drawing |
//! | [`consts`] | Shared numeric constants and stroke colors |

pub mod annotation;
pub mod consts;
pub mod editor;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
