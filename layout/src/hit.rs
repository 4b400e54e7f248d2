#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::{Point, Rect};

/// Which part of the edited annotation was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// CSS cursor shown while hovering the handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Se | Self::Nw => "nwse-resize",
        }
    }
}

/// Handle centers of `rect`, in [`ResizeAnchor::ALL`] order.
#[must_use]
pub fn handle_positions(rect: Rect) -> [(ResizeAnchor, Point); 8] {
    let ul = rect.upper_left();
    let lr = rect.lower_right();
    let cx = (ul.x + lr.x) * 0.5;
    let cy = (ul.y + lr.y) * 0.5;
    [
        (ResizeAnchor::N, Point::new(cx, ul.y)),
        (ResizeAnchor::Ne, Point::new(lr.x, ul.y)),
        (ResizeAnchor::E, Point::new(lr.x, cy)),
        (ResizeAnchor::Se, Point::new(lr.x, lr.y)),
        (ResizeAnchor::S, Point::new(cx, lr.y)),
        (ResizeAnchor::Sw, Point::new(ul.x, lr.y)),
        (ResizeAnchor::W, Point::new(ul.x, cy)),
        (ResizeAnchor::Nw, Point::new(ul.x, ul.y)),
    ]
}

/// Test `p` against `rect`, handles first.
#[must_use]
pub fn hit_test(p: Point, rect: Rect, handle_radius: f64) -> Option<HitPart> {
    for (anchor, center) in handle_positions(rect) {
        if (p.x - center.x).abs() <= handle_radius && (p.y - center.y).abs() <= handle_radius {
            return Some(HitPart::ResizeHandle(anchor));
        }
    }
    if rect.contains(p, 0.0) {
        return Some(HitPart::Body);
    }
    None
}

/// Resize `orig` by dragging `anchor` by `(dx, dy)`.
///
/// The opposite edge stays fixed. Dragging past it flips the rectangle; the
/// result is normalized.
#[must_use]
pub fn apply_resize(orig: Rect, anchor: ResizeAnchor, dx: f64, dy: f64) -> Rect {
    let ul = orig.upper_left();
    let lr = orig.lower_right();
    let (mut left, mut top, mut right, mut bottom) = (ul.x, ul.y, lr.x, lr.y);

    match anchor {
        ResizeAnchor::N => top += dy,
        ResizeAnchor::S => bottom += dy,
        ResizeAnchor::E => right += dx,
        ResizeAnchor::W => left += dx,
        ResizeAnchor::Ne => {
            top += dy;
            right += dx;
        }
        ResizeAnchor::Se => {
            bottom += dy;
            right += dx;
        }
        ResizeAnchor::Sw => {
            bottom += dy;
            left += dx;
        }
        ResizeAnchor::Nw => {
            top += dy;
            left += dx;
        }
    }

    Rect::from_corners(Point::new(left, top), Point::new(right, bottom))
}
