//! Screen state that does not touch the DOM.
//!
//! DESIGN
//! ======
//! Pages hold these in signals and mutate them from event handlers; keeping
//! them browser-free lets the state transitions be unit tested natively.

pub mod form;
pub mod layout_panel;
pub mod references;
