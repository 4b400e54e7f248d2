use super::*;

fn rect() -> Rect {
    Rect::new(100.0, 100.0, 200.0, 100.0)
}

#[test]
fn handle_positions_cover_corners_and_midpoints() {
    let handles = handle_positions(rect());
    let find = |a: ResizeAnchor| handles.iter().find(|(x, _)| *x == a).map(|(_, p)| *p);
    assert_eq!(find(ResizeAnchor::Nw), Some(Point::new(100.0, 100.0)));
    assert_eq!(find(ResizeAnchor::N), Some(Point::new(200.0, 100.0)));
    assert_eq!(find(ResizeAnchor::Se), Some(Point::new(300.0, 200.0)));
    assert_eq!(find(ResizeAnchor::W), Some(Point::new(100.0, 150.0)));
}

#[test]
fn handles_follow_normalized_corners() {
    let flipped = Rect::new(300.0, 200.0, -200.0, -100.0);
    assert_eq!(handle_positions(flipped), handle_positions(rect()));
}

#[test]
fn hit_prefers_handles_over_body() {
    assert_eq!(hit_test(Point::new(302.0, 198.0), rect(), 5.0), Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
    assert_eq!(hit_test(Point::new(150.0, 150.0), rect(), 5.0), Some(HitPart::Body));
    assert_eq!(hit_test(Point::new(50.0, 50.0), rect(), 5.0), None);
}

#[test]
fn resize_east_moves_only_right_edge() {
    let r = apply_resize(rect(), ResizeAnchor::E, 20.0, 99.0);
    assert_eq!(r, Rect::new(100.0, 100.0, 220.0, 100.0));
}

#[test]
fn resize_northwest_moves_both_leading_edges() {
    let r = apply_resize(rect(), ResizeAnchor::Nw, -10.0, 10.0);
    assert_eq!(r, Rect::new(90.0, 110.0, 210.0, 90.0));
}

#[test]
fn resize_past_opposite_edge_flips() {
    let r = apply_resize(rect(), ResizeAnchor::S, 0.0, -150.0);
    assert_eq!(r, Rect::new(100.0, 50.0, 200.0, 50.0));
}

#[test]
fn every_anchor_has_a_cursor() {
    for anchor in ResizeAnchor::ALL {
        assert!(anchor.cursor().ends_with("-resize"));
    }
}
