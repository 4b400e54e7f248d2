#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::Rect;
use records::resources::LayoutPoint;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Drag from `a` to `b` with the primary button.
fn draw(core: &mut EditorCore, a: Point, b: Point) -> Vec<Action> {
    core.on_pointer_down(a, Button::Primary);
    core.on_pointer_move(b);
    core.on_pointer_up(b, Button::Primary)
}

fn draw_saved(core: &mut EditorCore, name: &str, a: Point, b: Point) -> usize {
    draw(core, a, b);
    match core.save_pending(name, false) {
        Ok(Action::RegionSaved { index }) => index,
        other => panic!("save failed: {other:?}"),
    }
}

fn core_with_two() -> EditorCore {
    let mut core = EditorCore::new();
    draw_saved(&mut core, "first", pt(10.0, 10.0), pt(50.0, 30.0));
    draw_saved(&mut core, "second", pt(100.0, 100.0), pt(200.0, 140.0));
    core
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn pointer_down_starts_zero_size_pending_region() {
    let mut core = EditorCore::new();
    let actions = core.on_pointer_down(pt(5.0, 6.0), Button::Primary);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    let pending = core.pending().expect("pending region");
    assert_eq!(pending.rect, Rect::new(5.0, 6.0, 0.0, 0.0));
    assert!(matches!(core.input, InputState::Drawing { .. }));
}

#[test]
fn pointer_move_sets_signed_extent_from_anchor() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary);
    core.on_pointer_move(pt(20.0, 70.0));
    let rect = core.pending().expect("pending").rect;
    assert_eq!(rect.width, -30.0);
    assert_eq!(rect.height, 20.0);
}

#[test]
fn pointer_up_leaves_region_pending_a_name() {
    let mut core = EditorCore::new();
    let actions = draw(&mut core, pt(0.0, 0.0), pt(10.0, 10.0));
    assert!(actions.contains(&Action::RegionPending { index: 0 }));
    assert!(core.input.is_idle());
    assert!(core.pending().is_some());
}

#[test]
fn new_draw_discards_previous_pending_region() {
    let mut core = core_with_two();
    draw(&mut core, pt(0.0, 0.0), pt(5.0, 5.0));
    draw(&mut core, pt(300.0, 300.0), pt(310.0, 320.0));
    assert_eq!(core.annotations().len(), 3);
    assert_eq!(core.pending().expect("pending").rect.x, 300.0);
}

#[test]
fn secondary_button_does_not_draw() {
    let mut core = EditorCore::new();
    assert!(core.on_pointer_down(pt(1.0, 1.0), Button::Secondary).is_empty());
    assert!(core.annotations().is_empty());
}

#[test]
fn pointer_is_clamped_to_image() {
    let mut core = EditorCore::new();
    core.set_image(200.0, 100.0);
    draw(&mut core, pt(150.0, 50.0), pt(500.0, -20.0));
    let rect = core.pending().expect("pending").rect;
    assert_eq!(rect.width, 50.0);
    assert_eq!(rect.height, -50.0);
}

#[test]
fn set_image_fits_to_max_width() {
    let mut core = EditorCore::new();
    let fit = core.set_image(1800.0, 1200.0);
    assert_eq!(fit.display_width, MAX_DISPLAY_WIDTH);
    assert_eq!(fit.display_height, 600.0);
    assert_eq!(core.fit(), Some(fit));
}

// =============================================================
// Saving pending regions
// =============================================================

#[test]
fn save_pending_requires_name() {
    let mut core = EditorCore::new();
    draw(&mut core, pt(0.0, 0.0), pt(10.0, 10.0));
    assert_eq!(core.save_pending("   ", false), Err(EditorError::EmptyName));
    assert!(core.pending().is_some());
}

#[test]
fn save_pending_rejects_duplicate_name() {
    let mut core = core_with_two();
    draw(&mut core, pt(0.0, 0.0), pt(10.0, 10.0));
    assert_eq!(
        core.save_pending(" first ", false),
        Err(EditorError::DuplicateName("first".to_owned()))
    );
    assert!(core.pending().is_some());
}

#[test]
fn save_without_pending_region_fails() {
    let mut core = core_with_two();
    assert_eq!(core.save_pending("third", false), Err(EditorError::NoPendingRegion));
}

#[test]
fn save_fixes_name_multiline_and_stroke() {
    let mut core = EditorCore::new();
    draw(&mut core, pt(0.0, 0.0), pt(10.0, 10.0));
    core.save_pending(" notes ", true).expect("save");
    let a = &core.annotations()[0];
    assert!(a.saved);
    assert_eq!(a.name, "notes");
    assert!(a.multiline);
    assert_eq!(a.stroke, crate::consts::MULTILINE_STROKE);
    assert!(core.pending().is_none());
}

#[test]
fn drawing_in_either_direction_saves_same_corners() {
    let mut forward = EditorCore::new();
    draw_saved(&mut forward, "f", pt(10.0, 20.0), pt(60.0, 80.0));
    let mut backward = EditorCore::new();
    draw_saved(&mut backward, "f", pt(60.0, 80.0), pt(10.0, 20.0));

    let a = forward.layout_draft("L").expect("draft");
    let b = backward.layout_draft("L").expect("draft");
    assert_eq!(a, b);
    assert_eq!(a.fields[0].upper_left, LayoutPoint { x: 10.0, y: 20.0 });
    assert_eq!(a.fields[0].lower_right, LayoutPoint { x: 60.0, y: 80.0 });
}

#[test]
fn zero_size_region_can_still_be_named() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(5.0, 5.0), Button::Primary);
    core.on_pointer_up(pt(5.0, 5.0), Button::Primary);
    assert!(core.save_pending("dot", false).is_ok());
}

#[test]
fn discard_pending_removes_only_unsaved() {
    let mut core = core_with_two();
    assert!(!core.discard_pending());
    draw(&mut core, pt(0.0, 0.0), pt(1.0, 1.0));
    assert!(core.discard_pending());
    assert_eq!(core.annotations().len(), 2);
}

// =============================================================
// Edit sessions
// =============================================================

#[test]
fn begin_edit_exposes_attributes_and_suspends_drawing() {
    let mut core = core_with_two();
    let action = core.begin_edit(1).expect("edit");
    assert_eq!(
        action,
        Action::EditStarted {
            index: 1,
            name: "second".to_owned(),
            multiline: false
        }
    );
    assert_eq!(core.editing(), Some(1));

    // Pointer down outside the edited region does not start a new drawing.
    core.on_pointer_down(pt(400.0, 400.0), Button::Primary);
    assert_eq!(core.annotations().len(), 2);
    assert!(core.input.is_idle());
}

#[test]
fn begin_edit_rejects_unsaved_and_out_of_range() {
    let mut core = core_with_two();
    assert_eq!(core.begin_edit(9), Err(EditorError::OutOfRange(9)));
    draw(&mut core, pt(0.0, 0.0), pt(1.0, 1.0));
    assert_eq!(core.begin_edit(2), Err(EditorError::NotSaved(2)));
}

#[test]
fn body_drag_moves_edited_region() {
    let mut core = core_with_two();
    core.begin_edit(1).expect("edit");
    core.on_pointer_down(pt(150.0, 120.0), Button::Primary);
    core.on_pointer_move(pt(160.0, 125.0));
    let actions = core.on_pointer_up(pt(170.0, 130.0), Button::Primary);
    assert!(actions.contains(&Action::RegionChanged { index: 1 }));
    assert_eq!(core.annotations()[1].rect, Rect::new(120.0, 110.0, 100.0, 40.0));
}

#[test]
fn handle_drag_resizes_edited_region() {
    let mut core = core_with_two();
    core.begin_edit(1).expect("edit");
    core.on_pointer_down(pt(200.0, 140.0), Button::Primary);
    core.on_pointer_up(pt(220.0, 160.0), Button::Primary);
    assert_eq!(core.annotations()[1].rect, Rect::new(100.0, 100.0, 120.0, 60.0));
}

#[test]
fn body_drag_stops_at_image_edges() {
    let mut core = EditorCore::new();
    core.set_image(400.0, 300.0);
    draw_saved(&mut core, "corner", pt(0.0, 0.0), pt(100.0, 100.0));
    draw_saved(&mut core, "far", pt(300.0, 200.0), pt(400.0, 300.0));

    core.begin_edit(0).expect("edit");
    core.on_pointer_down(pt(90.0, 90.0), Button::Primary);
    core.on_pointer_up(pt(0.0, 0.0), Button::Primary);
    core.apply_edit().expect("apply");

    core.begin_edit(1).expect("edit");
    core.on_pointer_down(pt(350.0, 250.0), Button::Primary);
    core.on_pointer_move(pt(400.0, 300.0));
    // Dragging back still moves from where the gesture started.
    core.on_pointer_up(pt(340.0, 240.0), Button::Primary);
    core.apply_edit().expect("apply");

    let draft = core.layout_draft("Edges").expect("draft");
    assert_eq!(draft.fields[0].upper_left, LayoutPoint { x: 0.0, y: 0.0 });
    assert_eq!(draft.fields[0].lower_right, LayoutPoint { x: 100.0, y: 100.0 });
    assert_eq!(draft.fields[1].upper_left, LayoutPoint { x: 290.0, y: 190.0 });
    assert_eq!(draft.fields[1].lower_right, LayoutPoint { x: 390.0, y: 290.0 });
}

#[test]
fn handle_drag_stays_on_image() {
    let mut core = EditorCore::new();
    core.set_image(400.0, 300.0);
    draw_saved(&mut core, "box", pt(0.0, 0.0), pt(100.0, 100.0));
    core.begin_edit(0).expect("edit");

    // Grab the south-east handle slightly inside its corner.
    core.on_pointer_down(pt(96.0, 96.0), Button::Primary);
    core.on_pointer_up(pt(400.0, 300.0), Button::Primary);
    assert_eq!(core.annotations()[0].rect, Rect::new(0.0, 0.0, 400.0, 300.0));
}

#[test]
fn hover_reports_handle_cursor_while_editing() {
    let mut core = core_with_two();
    assert!(core.on_pointer_move(pt(200.0, 140.0)).is_empty());
    core.begin_edit(1).expect("edit");
    assert_eq!(core.on_pointer_move(pt(200.0, 140.0)), vec![Action::SetCursor("nwse-resize")]);
    assert_eq!(core.on_pointer_move(pt(150.0, 120.0)), vec![Action::SetCursor("move")]);
}

#[test]
fn attribute_changes_apply_without_redrawing() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    core.set_edit_name("renamed").expect("name");
    core.set_edit_multiline(true).expect("multiline");
    assert_eq!(core.apply_edit(), Ok(Action::EditApplied { index: 0 }));
    let a = &core.annotations()[0];
    assert_eq!(a.name, "renamed");
    assert!(a.multiline);
    assert_eq!(a.rect, Rect::new(10.0, 10.0, 40.0, 20.0));
    assert_eq!(core.editing(), None);
}

#[test]
fn apply_edit_rejects_name_of_another_region() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    core.set_edit_name("second").expect("name");
    assert_eq!(core.apply_edit(), Err(EditorError::DuplicateName("second".to_owned())));
    assert_eq!(core.editing(), Some(0));
}

#[test]
fn apply_edit_keeps_own_name() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    assert!(core.apply_edit().is_ok());
}

#[test]
fn cancel_edit_restores_snapshot() {
    let mut core = core_with_two();
    let before = core.annotations()[1].clone();
    core.begin_edit(1).expect("edit");
    core.set_edit_name("changed").expect("name");
    core.on_pointer_down(pt(150.0, 120.0), Button::Primary);
    core.on_pointer_up(pt(190.0, 160.0), Button::Primary);
    assert_eq!(core.cancel_edit(), Some(Action::EditCancelled { index: 1 }));
    assert_eq!(core.annotations()[1], before);
    assert_eq!(core.cancel_edit(), None);
}

#[test]
fn switching_edit_target_cancels_previous_session() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    core.set_edit_name("draft name").expect("name");
    core.begin_edit(1).expect("edit");
    assert_eq!(core.annotations()[0].name, "first");
    assert_eq!(core.editing(), Some(1));
}

#[test]
fn edit_calls_without_session_fail() {
    let mut core = core_with_two();
    assert_eq!(core.set_edit_name("x"), Err(EditorError::NotEditing));
    assert_eq!(core.set_edit_multiline(true), Err(EditorError::NotEditing));
    assert_eq!(core.apply_edit(), Err(EditorError::NotEditing));
}

// =============================================================
// Deleting
// =============================================================

#[test]
fn delete_removes_by_index() {
    let mut core = core_with_two();
    assert_eq!(core.delete(0), Ok(Action::RegionDeleted { index: 0 }));
    assert_eq!(core.annotations().len(), 1);
    assert_eq!(core.annotations()[0].name, "second");
    assert_eq!(core.delete(5), Err(EditorError::OutOfRange(5)));
}

#[test]
fn delete_before_edited_region_shifts_session() {
    let mut core = core_with_two();
    core.begin_edit(1).expect("edit");
    core.delete(0).expect("delete");
    assert_eq!(core.editing(), Some(0));
    assert!(core.apply_edit().is_ok());
}

#[test]
fn deleting_edited_region_closes_session() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    core.delete(0).expect("delete");
    assert_eq!(core.editing(), None);
    assert_eq!(core.annotations().len(), 1);
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn draft_requires_layout_name() {
    let core = core_with_two();
    assert_eq!(core.layout_draft(" "), Err(EditorError::EmptyLayoutName));
}

#[test]
fn draft_excludes_pending_and_uses_edit_snapshot_without_mutating() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    core.set_edit_name("in progress").expect("name");
    core.on_pointer_down(pt(20.0, 20.0), Button::Primary);
    core.on_pointer_up(pt(60.0, 60.0), Button::Primary);

    let before = core.clone();
    let draft = core.layout_draft(" Invoice ").expect("draft");
    assert_eq!(draft.name, "Invoice");
    assert_eq!(draft.fields.len(), 2);
    assert_eq!(draft.fields[0].name, "first");
    assert_eq!(draft.fields[0].upper_left, LayoutPoint { x: 10.0, y: 10.0 });

    assert_eq!(core.annotations(), before.annotations());
    assert_eq!(core.editing(), Some(0));
}

#[test]
fn draft_skips_trailing_unsaved_region() {
    let mut core = core_with_two();
    draw(&mut core, pt(0.0, 0.0), pt(5.0, 5.0));
    let draft = core.layout_draft("L").expect("draft");
    assert_eq!(draft.fields.len(), 2);
    assert_eq!(core.annotations().len(), 3);
}

#[test]
fn mark_persisted_discards_pending_and_rolls_back_edit() {
    let mut core = core_with_two();
    core.begin_edit(1).expect("edit");
    core.set_edit_name("unsaved rename").expect("name");
    core.on_pointer_down(pt(150.0, 120.0), Button::Primary);
    core.on_pointer_up(pt(160.0, 130.0), Button::Primary);
    core.mark_persisted(core.draft_mark());
    assert_eq!(core.editing(), None);
    assert_eq!(core.annotations()[1].name, "second");
    assert_eq!(core.annotations()[1].rect, Rect::new(100.0, 100.0, 100.0, 40.0));

    draw(&mut core, pt(0.0, 0.0), pt(5.0, 5.0));
    core.mark_persisted(core.draft_mark());
    assert_eq!(core.annotations().len(), 2);
}

#[test]
fn work_started_after_the_draft_survives_persisting() {
    let mut core = core_with_two();
    draw(&mut core, pt(0.0, 0.0), pt(5.0, 5.0));
    let mark = core.draft_mark();
    core.layout_draft("L").expect("draft");

    // While the save is in flight: a new region replaces the old pending
    // one, then an edit opens.
    draw(&mut core, pt(300.0, 300.0), pt(320.0, 330.0));
    core.begin_edit(0).expect("edit");
    core.set_edit_name("renaming").expect("name");

    core.mark_persisted(mark);
    assert_eq!(core.annotations().len(), 3);
    assert!(core.pending().is_some());
    assert_eq!(core.editing(), Some(0));
    assert_eq!(core.annotations()[0].name, "renaming");
}

#[test]
fn edit_reopened_after_the_draft_is_not_rolled_back() {
    let mut core = core_with_two();
    core.begin_edit(1).expect("edit");
    let mark = core.draft_mark();
    core.cancel_edit();
    core.begin_edit(1).expect("edit again");
    core.set_edit_name("later").expect("name");

    core.mark_persisted(mark);
    assert_eq!(core.editing(), Some(1));
    assert_eq!(core.annotations()[1].name, "later");
}

#[test]
fn load_regions_replaces_state() {
    let mut core = core_with_two();
    core.begin_edit(0).expect("edit");
    let fields = vec![LayoutField {
        name: "loaded".to_owned(),
        upper_left: LayoutPoint { x: 1.0, y: 2.0 },
        lower_right: LayoutPoint { x: 3.0, y: 4.0 },
        multiline: true,
    }];
    core.load_regions(&fields);
    assert_eq!(core.editing(), None);
    assert_eq!(core.annotations().len(), 1);
    assert_eq!(core.layout_draft("L").expect("draft").fields, fields);
    core.clear();
    assert!(core.annotations().is_empty());
}
