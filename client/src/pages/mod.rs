//! Route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its signals, its fetches and its push subscription, and
//! hands rendering of tables, forms and dialogs to `components`.

pub mod destinations;
pub mod home;
pub mod instances;
pub mod layout_editor;
pub mod layouts;
pub mod logs;
pub mod remote;
pub mod resource;
