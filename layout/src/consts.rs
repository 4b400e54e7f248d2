//! Shared constants for the layout editor.

// ── Image ───────────────────────────────────────────────────────

/// Widest a reference image is displayed; larger images are scaled down.
pub const MAX_DISPLAY_WIDTH: f64 = 900.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Half-size of a resize handle in display pixels; also the hit slop.
pub const HANDLE_RADIUS_PX: f64 = 5.0;

// ── Colors ──────────────────────────────────────────────────────

/// Stroke of a saved single-line region.
pub const SINGLE_LINE_STROKE: &str = "#1E90FF";

/// Stroke of a saved multi-line region.
pub const MULTILINE_STROKE: &str = "#E67E22";

/// Stroke of the region still waiting for a name.
pub const PENDING_STROKE: &str = "#D32F2F";

/// Stroke of the region under edit.
pub const EDIT_STROKE: &str = "#8E44AD";

/// Dash segment length for the pending region.
pub const PENDING_DASH_PX: f64 = 6.0;

/// Stroke color a saved region gets for its multi-line flag.
#[must_use]
pub fn stroke_for(multiline: bool) -> &'static str {
    if multiline { MULTILINE_STROKE } else { SINGLE_LINE_STROKE }
}
