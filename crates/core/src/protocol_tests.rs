// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;

fn test_session(id: &str) -> Session {
    let mut session = Session::new(
        id,
        "wallet-1",
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        "Bellagio",
        5000,
        7000,
        4.5,
    );
    session.extras.stakes = Some("1/2".to_string());
    session
}

#[test]
fn request_roundtrip() {
    let sessions = vec![test_session("s-1"), test_session("s-2")];
    let request = SyncRequest::new("client-abc", &sessions);

    let json = request.to_json().unwrap();
    let parsed = SyncRequest::from_json(&json).unwrap();
    assert_eq!(request, parsed);
}

#[test]
fn request_wire_shape() {
    let request = SyncRequest::new("client-abc", &[test_session("s-1")]);
    let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

    assert_eq!(value["originator"], "client-abc");
    let entry = &value["changes"][0];
    assert_eq!(entry["kind"], "session_upsert");
    assert_eq!(entry["clientId"], "s-1");
    assert_eq!(entry["data"]["walletId"], "wallet-1");
    assert_eq!(entry["data"]["buyinAmount"], 5000);
    assert_eq!(entry["data"]["cashoutAmount"], 7000);
    assert_eq!(entry["data"]["stakes"], "1/2");
    // Unset extras are omitted, not serialized as null
    assert!(entry["data"].get("notes").is_none());
}

#[test]
fn request_preserves_change_order() {
    let sessions = vec![test_session("s-1"), test_session("s-2"), test_session("s-3")];
    let request = SyncRequest::new("client-abc", &sessions);
    assert_eq!(request.client_ids(), vec!["s-1", "s-2", "s-3"]);
}

#[test]
fn upsert_carries_current_field_values() {
    let mut session = test_session("s-1");
    session.location = "Aria".to_string();
    session.cashout_minor = 12000;

    let entry = ChangeEntry::upsert(&session);
    assert_eq!(entry.client_id, "s-1");
    assert_eq!(entry.data.location, "Aria");
    assert_eq!(entry.data.cashout_amount, 12000);
}

#[test]
fn response_roundtrip() {
    let response = SyncResponse::confirming(vec!["s-1".to_string(), "s-3".to_string()]);
    let json = response.to_json().unwrap();
    let parsed = SyncResponse::from_json(&json).unwrap();
    assert_eq!(response, parsed);
}

#[test]
fn response_parses_wire_shape() {
    let response = SyncResponse::from_json(r#"{"confirmed":["a","b"]}"#).unwrap();
    assert_eq!(response.confirmed, vec!["a", "b"]);
}

#[test]
fn response_rejects_malformed_body() {
    assert!(SyncResponse::from_json(r#"{"accepted":["a"]}"#).is_err());
    assert!(SyncResponse::from_json("not json").is_err());
}
