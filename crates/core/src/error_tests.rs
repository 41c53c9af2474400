// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    duplicate_id = { Error::DuplicateId("s-1".into()), "s-1" },
    session_not_found = { Error::SessionNotFound("s-2".into()), "s-2" },
    invalid_amount = { Error::InvalidAmount("12.345".into()), "12.345" },
    corrupted_data = { Error::CorruptedData("bad row".into()), "bad row" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
