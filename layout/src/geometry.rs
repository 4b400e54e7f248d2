//! Points, signed rectangles and image fitting.
//!
//! All editor coordinates live in the display space of the fitted image.
//! A [`Rect`] keeps the signed width/height produced while dragging, so a
//! region drawn right-to-left has a negative width until it is normalized.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use records::resources::LayoutPoint;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for LayoutPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<LayoutPoint> for Point {
    fn from(p: LayoutPoint) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Anchor corner plus signed extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-size rectangle anchored at `p`.
    #[must_use]
    pub fn at(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    /// Rectangle spanning two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y).normalized()
    }

    /// Same area with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn upper_left(self) -> Point {
        let n = self.normalized();
        Point::new(n.x, n.y)
    }

    #[must_use]
    pub fn lower_right(self) -> Point {
        let n = self.normalized();
        Point::new(n.x + n.width, n.y + n.height)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Whether `p` lies inside, edges included, with `slop` extra margin.
    #[must_use]
    pub fn contains(self, p: Point, slop: f64) -> bool {
        let ul = self.upper_left();
        let lr = self.lower_right();
        p.x >= ul.x - slop && p.x <= lr.x + slop && p.y >= ul.y - slop && p.y <= lr.y + slop
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }
}

/// How a reference image maps onto the editor's display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFit {
    pub natural_width: f64,
    pub natural_height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl ImageFit {
    /// Scale `natural` down to at most `max_width` wide, preserving aspect ratio.
    /// Images already narrow enough keep their size.
    #[must_use]
    pub fn fit_to_width(natural_width: f64, natural_height: f64, max_width: f64) -> Self {
        let scale = if natural_width > max_width && natural_width > 0.0 {
            max_width / natural_width
        } else {
            1.0
        };
        Self {
            natural_width,
            natural_height,
            display_width: natural_width * scale,
            display_height: natural_height * scale,
        }
    }

    /// Display space fixed by a stored layout, independent of the image's natural size.
    #[must_use]
    pub fn with_display(natural_width: f64, natural_height: f64, display_width: f64, display_height: f64) -> Self {
        Self {
            natural_width,
            natural_height,
            display_width,
            display_height,
        }
    }

    /// Display pixels per natural pixel, horizontally.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        if self.natural_width == 0.0 { 1.0 } else { self.display_width / self.natural_width }
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        if self.natural_height == 0.0 { 1.0 } else { self.display_height / self.natural_height }
    }

    #[must_use]
    pub fn to_natural(&self, p: Point) -> Point {
        Point::new(p.x / self.scale_x(), p.y / self.scale_y())
    }

    #[must_use]
    pub fn to_display(&self, p: Point) -> Point {
        Point::new(p.x * self.scale_x(), p.y * self.scale_y())
    }

    /// Clamp a display-space point onto the image.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.display_width.max(0.0)),
            p.y.clamp(0.0, self.display_height.max(0.0)),
        )
    }

    /// Clamp both corners of `rect` onto the image. The result is normalized.
    #[must_use]
    pub fn clamp_rect(&self, rect: Rect) -> Rect {
        Rect::from_corners(self.clamp(rect.upper_left()), self.clamp(rect.lower_right()))
    }

    /// Shift `rect` by up to `(dx, dy)`, stopping at the image edges. The size is kept.
    #[must_use]
    pub fn translate_within(&self, rect: Rect, dx: f64, dy: f64) -> Rect {
        let ul = rect.upper_left();
        let lr = rect.lower_right();
        let dx = dx.clamp(-ul.x, (self.display_width - lr.x).max(-ul.x));
        let dy = dy.clamp(-ul.y, (self.display_height - lr.y).max(-ul.y));
        rect.translated(dx, dy)
    }

    /// Whole-pixel display size for the canvas element and the persisted dimensions.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn display_size(&self) -> (u32, u32) {
        (
            self.display_width.round().max(0.0) as u32,
            self.display_height.round().max(0.0) as u32,
        )
    }
}
