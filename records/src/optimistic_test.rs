use super::*;
use crate::resources::{AccessToken, FtpEndpoint};

fn table() -> TableState<AccessToken> {
    let mut table = TableState::new();
    table.set_items(vec![AccessToken {
        id: Some(1),
        token: "t".to_owned(),
        name: "n".to_owned(),
        description: String::new(),
        active: true,
    }]);
    table
}

#[test]
fn toggle_flips_immediately() {
    let mut table = table();
    let pending = begin_toggle(&mut table, 1).expect("row exists");
    assert_eq!(table.find(1).map(|t| t.active), Some(false));
    assert!(pending.previous());
    assert!(!pending.desired());
    assert_eq!(pending.request_body(), serde_json::json!({ "active": false }));
    pending.commit();
    assert_eq!(table.find(1).map(|t| t.active), Some(false));
}

#[test]
fn rollback_restores_previous_value() {
    let mut table = table();
    let pending = begin_toggle(&mut table, 1).expect("row exists");
    pending.rollback(&mut table);
    assert_eq!(table.find(1).map(|t| t.active), Some(true));
}

#[test]
fn rollback_after_row_removed_is_harmless() {
    let mut table = table();
    let pending = begin_toggle(&mut table, 1).expect("row exists");
    table.remove(1);
    pending.rollback(&mut table);
    assert!(table.items().is_empty());
}

#[test]
fn toggle_missing_row_or_flagless_resource_is_none() {
    let mut table = table();
    assert!(begin_toggle(&mut table, 42).is_none());

    let mut ftp = TableState::new();
    ftp.set_items(vec![FtpEndpoint {
        id: Some(1),
        ..FtpEndpoint::default()
    }]);
    assert!(begin_toggle(&mut ftp, 1).is_none());
}
