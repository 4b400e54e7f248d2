//! Annotation model.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use records::resources::LayoutField;

use crate::consts::{PENDING_STROKE, stroke_for};
use crate::geometry::{Point, Rect};

/// One rectangular region over the reference image.
///
/// Unsaved annotations have no name yet and are always the last entry of the
/// editor's list.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub rect: Rect,
    pub saved: bool,
    pub multiline: bool,
    pub stroke: &'static str,
}

impl Annotation {
    /// Zero-size unsaved annotation anchored at `p`.
    #[must_use]
    pub fn pending(p: Point) -> Self {
        Self {
            name: String::new(),
            rect: Rect::at(p),
            saved: false,
            multiline: false,
            stroke: PENDING_STROKE,
        }
    }

    /// Saved annotation restored from a persisted field.
    #[must_use]
    pub fn from_field(field: &LayoutField) -> Self {
        Self {
            name: field.name.clone(),
            rect: Rect::from_corners(field.upper_left.into(), field.lower_right.into()),
            saved: true,
            multiline: field.multiline,
            stroke: stroke_for(field.multiline),
        }
    }

    /// Persisted form with normalized corners.
    #[must_use]
    pub fn to_field(&self) -> LayoutField {
        LayoutField {
            name: self.name.clone(),
            upper_left: self.rect.upper_left().into(),
            lower_right: self.rect.lower_right().into(),
            multiline: self.multiline,
        }
    }

    /// Fix the name and line mode and mark saved.
    pub(crate) fn seal(&mut self, name: &str, multiline: bool) {
        self.name = name.to_owned();
        self.multiline = multiline;
        self.stroke = stroke_for(multiline);
        self.rect = self.rect.normalized();
        self.saved = true;
    }
}
