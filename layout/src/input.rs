//! Pointer buttons and the gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! Drawing is only possible while no edit session is open; moving and
//! resizing only apply to the annotation under edit.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::{Point, Rect};
use crate::hit::ResizeAnchor;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Sizing the trailing unsaved annotation from the pointer-down position.
    Drawing {
        anchor: Point,
    },
    /// Dragging the edited annotation by its body.
    Moving {
        start: Point,
        orig: Rect,
    },
    /// Dragging one of the edited annotation's handles.
    Resizing {
        anchor: ResizeAnchor,
        start: Point,
        orig: Rect,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
