// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;

fn test_session() -> Session {
    Session::new(
        "s-1",
        "wallet-1",
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        "Bellagio",
        5000,
        7000,
        4.5,
    )
}

#[test]
fn new_session_is_unsynced() {
    let session = test_session();
    assert!(session.synced_at.is_none());
    assert!(!session.is_synced());
}

#[test]
fn net_without_extras() {
    let session = test_session();
    assert_eq!(session.net_minor(), 2000);
}

#[test]
fn net_subtracts_tips_and_expenses() {
    let mut session = test_session();
    session.extras.tips_minor = Some(500);
    session.extras.expenses_minor = Some(300);
    assert_eq!(session.net_minor(), 1200);
}

#[test]
fn serde_roundtrip() {
    let mut session = test_session();
    session.extras.stakes = Some("2/5".to_string());
    session.extras.notes = Some("ran hot".to_string());

    let json = serde_json::to_string(&session).unwrap();
    let parsed: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(session, parsed);
}

#[test]
fn extras_default_when_absent_in_json() {
    let session = test_session();
    let mut value = serde_json::to_value(&session).unwrap();
    value.as_object_mut().unwrap().remove("extras");

    let parsed: Session = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.extras, SessionExtras::default());
}
