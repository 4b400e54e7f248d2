use super::*;
use layout::geometry::Point;
use layout::input::Button;

fn draw(core: &mut EditorCore, panel: &mut LayoutPanel, a: (f64, f64), b: (f64, f64)) {
    let mut actions = core.on_pointer_down(Point::new(a.0, a.1), Button::Primary);
    actions.extend(core.on_pointer_move(Point::new(b.0, b.1)));
    actions.extend(core.on_pointer_up(Point::new(b.0, b.1), Button::Primary));
    panel.apply(&actions);
    panel.sync(core);
}

// =============================================================
// Name prompt
// =============================================================

#[test]
fn finished_drawing_opens_name_prompt() {
    let mut core = EditorCore::new();
    let mut panel = LayoutPanel::default();
    draw(&mut core, &mut panel, (0.0, 0.0), (20.0, 20.0));
    assert_eq!(panel.prompt.as_ref().map(|p| p.index), Some(0));
    assert_eq!(panel.regions.len(), 1);
    assert!(!panel.regions[0].saved);
}

#[test]
fn saving_closes_prompt_and_lists_region() {
    let mut core = EditorCore::new();
    let mut panel = LayoutPanel::default();
    draw(&mut core, &mut panel, (0.0, 0.0), (20.0, 20.0));
    let action = core.save_pending("total", false).expect("save");
    assert!(panel.apply(&[action]));
    panel.sync(&core);
    assert!(panel.prompt.is_none());
    assert_eq!(panel.saved_count(), 1);
    assert_eq!(panel.regions[0].name, "total");
}

#[test]
fn starting_a_new_drawing_drops_stale_prompt() {
    let mut core = EditorCore::new();
    let mut panel = LayoutPanel::default();
    draw(&mut core, &mut panel, (0.0, 0.0), (20.0, 20.0));
    let actions = core.on_pointer_down(Point::new(50.0, 50.0), Button::Primary);
    panel.apply(&actions);
    panel.sync(&core);
    assert!(panel.prompt.is_none());
}

// =============================================================
// Edit panel
// =============================================================

#[test]
fn edit_panel_follows_session() {
    let mut core = EditorCore::new();
    let mut panel = LayoutPanel::default();
    draw(&mut core, &mut panel, (0.0, 0.0), (20.0, 20.0));
    core.save_pending("a", true).expect("save");

    let started = core.begin_edit(0).expect("edit");
    panel.apply(&[started]);
    panel.sync(&core);
    let edit = panel.edit.as_ref().expect("edit panel");
    assert_eq!(edit.name, "a");
    assert!(edit.multiline);

    let cancelled = core.cancel_edit().expect("cancel");
    panel.apply(&[cancelled]);
    panel.sync(&core);
    assert!(panel.edit.is_none());
}

#[test]
fn deleting_earlier_region_shifts_edit_panel() {
    let mut core = EditorCore::new();
    let mut panel = LayoutPanel::default();
    draw(&mut core, &mut panel, (0.0, 0.0), (20.0, 20.0));
    core.save_pending("a", false).expect("save");
    draw(&mut core, &mut panel, (30.0, 30.0), (60.0, 60.0));
    core.save_pending("b", false).expect("save");

    let started = core.begin_edit(1).expect("edit");
    panel.apply(&[started]);
    let deleted = core.delete(0).expect("delete");
    panel.apply(&[deleted]);
    panel.sync(&core);
    assert_eq!(panel.edit.as_ref().map(|e| e.index), Some(0));
    assert_eq!(panel.regions.len(), 1);
}

#[test]
fn cursor_action_does_not_request_render() {
    let mut panel = LayoutPanel::default();
    assert!(!panel.apply(&[Action::SetCursor("move")]));
    assert_eq!(panel.cursor, "move");
}

#[test]
fn editor_errors_surface_as_text() {
    let mut panel = LayoutPanel::default();
    panel.editor_error(&EditorError::DuplicateName("total".to_owned()));
    assert_eq!(panel.error.as_deref(), Some("a field named `total` already exists"));
}
