use super::*;

#[test]
fn button_from_dom_maps_standard_values() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(7), Button::Primary);
}

#[test]
fn input_state_defaults_to_idle() {
    assert!(InputState::default().is_idle());
    assert!(!InputState::Drawing { anchor: Point::new(0.0, 0.0) }.is_idle());
}
