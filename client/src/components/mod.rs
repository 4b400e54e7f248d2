//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Generic pieces are plain functions parameterized by the row or resource
//! type; fixed-shape pieces are `#[component]`s. None of them fetch data.

pub mod alert;
pub mod data_table;
pub mod dialog;
pub mod record_form;
