//! Rendering: draws the reference image and every region to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads editor state and produces pixels; it does not mutate anything.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::editor::Editor::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::annotation::Annotation;
use crate::consts::{HANDLE_RADIUS_PX, PENDING_DASH_PX};
use crate::editor::{Background, EditorCore};
use crate::hit;

/// Label font size in display pixels.
const LABEL_FONT_PX: f64 = 12.0;
/// Padding around label text.
const LABEL_PAD_PX: f64 = 3.0;

/// Draw the full scene: image, regions, labels, and edit handles.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EditorCore,
    background: Option<&Background>,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and draw the reference image.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width, height);
    match background {
        Some(Background::Image(img)) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, width, height)?;
        }
        Some(Background::Canvas(canvas)) => {
            ctx.draw_image_with_html_canvas_element_and_dw_and_dh(canvas, 0.0, 0.0, width, height)?;
        }
        None => {
            ctx.set_fill_style_str("#f4f4f4");
            ctx.fill_rect(0.0, 0.0, width, height);
        }
    }

    // Layer 2: regions in list order.
    for annotation in core.annotations() {
        draw_annotation(ctx, annotation)?;
    }

    // Layer 3: handles of the region under edit.
    if let Some(index) = core.editing() {
        if let Some(annotation) = core.annotations().get(index) {
            draw_handles(ctx, annotation)?;
        }
    }

    Ok(())
}

fn draw_annotation(ctx: &CanvasRenderingContext2d, annotation: &Annotation) -> Result<(), JsValue> {
    let r = annotation.rect.normalized();
    ctx.save();

    ctx.set_stroke_style_str(annotation.stroke);
    ctx.set_line_width(if annotation.multiline { 2.0 } else { 1.5 });
    if !annotation.saved {
        let dash = js_sys::Array::new();
        dash.push(&PENDING_DASH_PX.into());
        dash.push(&PENDING_DASH_PX.into());
        ctx.set_line_dash(&dash)?;
    }
    ctx.stroke_rect(r.x, r.y, r.width, r.height);
    ctx.set_line_dash(&js_sys::Array::new())?;

    if annotation.saved && !annotation.name.is_empty() {
        draw_label(ctx, annotation)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, annotation: &Annotation) -> Result<(), JsValue> {
    let ul = annotation.rect.upper_left();
    ctx.set_font(&format!("{LABEL_FONT_PX:.0}px sans-serif"));
    let text_w = ctx.measure_text(&annotation.name)?.width();
    let box_h = LABEL_FONT_PX + LABEL_PAD_PX * 2.0;
    // Above the region when there is room, inside it otherwise.
    let top = if ul.y >= box_h { ul.y - box_h } else { ul.y };

    ctx.set_fill_style_str(annotation.stroke);
    ctx.fill_rect(ul.x, top, text_w + LABEL_PAD_PX * 2.0, box_h);
    ctx.set_fill_style_str("#fff");
    ctx.set_text_baseline("top");
    ctx.fill_text(&annotation.name, ul.x + LABEL_PAD_PX, top + LABEL_PAD_PX)?;
    Ok(())
}

fn draw_handles(ctx: &CanvasRenderingContext2d, annotation: &Annotation) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str(annotation.stroke);
    ctx.set_line_width(1.0);

    for (_, pos) in hit::handle_positions(annotation.rect) {
        ctx.fill_rect(
            pos.x - HANDLE_RADIUS_PX,
            pos.y - HANDLE_RADIUS_PX,
            HANDLE_RADIUS_PX * 2.0,
            HANDLE_RADIUS_PX * 2.0,
        );
        ctx.stroke_rect(
            pos.x - HANDLE_RADIUS_PX,
            pos.y - HANDLE_RADIUS_PX,
            HANDLE_RADIUS_PX * 2.0,
            HANDLE_RADIUS_PX * 2.0,
        );
    }

    ctx.restore();
    Ok(())
}
