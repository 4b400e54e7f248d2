#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{MULTILINE_STROKE, SINGLE_LINE_STROKE};
use records::resources::LayoutPoint;

#[test]
fn pending_starts_unsaved_and_zero_size() {
    let a = Annotation::pending(Point::new(4.0, 5.0));
    assert!(!a.saved);
    assert!(a.name.is_empty());
    assert!(a.rect.is_empty());
    assert_eq!(a.stroke, PENDING_STROKE);
}

#[test]
fn seal_normalizes_and_sets_stroke() {
    let mut a = Annotation::pending(Point::new(50.0, 50.0));
    a.rect.width = -20.0;
    a.rect.height = -10.0;
    a.seal("total", true);
    assert!(a.saved);
    assert_eq!(a.rect, Rect::new(30.0, 40.0, 20.0, 10.0));
    assert_eq!(a.stroke, MULTILINE_STROKE);
}

#[test]
fn field_conversion_round_trips() {
    let field = LayoutField {
        name: "invoice_no".to_owned(),
        upper_left: LayoutPoint { x: 10.0, y: 20.0 },
        lower_right: LayoutPoint { x: 110.0, y: 45.0 },
        multiline: false,
    };
    let a = Annotation::from_field(&field);
    assert!(a.saved);
    assert_eq!(a.stroke, SINGLE_LINE_STROKE);
    assert_eq!(a.to_field(), field);
}

#[test]
fn from_field_tolerates_swapped_corners() {
    let field = LayoutField {
        name: "x".to_owned(),
        upper_left: LayoutPoint { x: 110.0, y: 45.0 },
        lower_right: LayoutPoint { x: 10.0, y: 20.0 },
        multiline: false,
    };
    let a = Annotation::from_field(&field);
    assert_eq!(a.to_field().upper_left, LayoutPoint { x: 10.0, y: 20.0 });
}
