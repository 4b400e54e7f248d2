use super::*;
use records::resources::AccessToken;

fn token() -> AccessToken {
    AccessToken {
        id: Some(7),
        token: "abc".to_owned(),
        name: "scanner".to_owned(),
        description: String::new(),
        active: true,
    }
}

// =============================================================
// Seeding
// =============================================================

#[test]
fn create_starts_blank_for_every_field() {
    let form = FormState::create::<AccessToken>();
    assert!(!form.is_edit());
    assert_eq!(form.values.text("name"), "");
    assert!(!form.values.flag("active"));
}

#[test]
fn edit_seeds_from_record() {
    let form = FormState::edit(&token());
    assert_eq!(form.id, Some(7));
    assert_eq!(form.values.text("token"), "abc");
    assert!(form.values.flag("active"));
}

// =============================================================
// Submit
// =============================================================

#[test]
fn empty_required_field_blocks_submit() {
    let mut form = FormState::create::<AccessToken>();
    form.set_text("token", "secret".to_owned());
    assert!(form.prepare::<AccessToken>().is_none());
    assert!(form.field_error("name").is_some());
    assert!(form.field_error("token").is_none());
    assert!(!form.busy);
}

#[test]
fn valid_form_yields_record_and_marks_busy() {
    let mut form = FormState::create::<AccessToken>();
    form.set_text("name", "ops".to_owned());
    form.set_text("token", "secret".to_owned());
    form.set_flag("active", true);
    let record = form.prepare::<AccessToken>().expect("valid");
    assert_eq!(record.id, None);
    assert!(record.active);
    assert!(form.busy);
    assert!(form.errors.is_empty());
}

#[test]
fn successful_prepare_clears_previous_errors() {
    let mut form = FormState::create::<AccessToken>();
    let _ = form.prepare::<AccessToken>();
    assert!(!form.errors.is_empty());
    form.set_text("name", "ops".to_owned());
    form.set_text("token", "secret".to_owned());
    assert!(form.prepare::<AccessToken>().is_some());
    assert!(form.errors.is_empty());
}

#[test]
fn server_failure_keeps_values_and_reports_message() {
    let mut form = FormState::edit(&token());
    let _ = form.prepare::<AccessToken>();
    form.fail(ApiError::Status {
        status: 409,
        message: Some("token already exists".to_owned()),
    });
    assert!(!form.busy);
    assert_eq!(form.error.as_deref(), Some("token already exists"));
    assert_eq!(form.values.text("name"), "scanner");
}

#[test]
fn validation_failure_from_server_lands_on_fields() {
    let mut form = FormState::edit(&token());
    let mut errors = ValidationErrors::new();
    errors.push("token", "is already used");
    form.fail(ApiError::Validation(errors));
    assert_eq!(form.field_error("token"), Some("is already used"));
    assert!(form.error.is_none());
}
