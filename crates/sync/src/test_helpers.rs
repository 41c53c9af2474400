// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use grind_core::{Ledger, Session};

/// Create a test session with the given id.
pub fn make_test_session(id: &str) -> Session {
    Session::new(
        id,
        "wallet-1",
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        "Bellagio",
        5000,
        7000,
        4.5,
    )
}

/// Create a shared in-memory ledger pre-populated with the given ids.
pub fn make_ledger(ids: &[&str]) -> Arc<Mutex<Ledger>> {
    let mut ledger = Ledger::open_in_memory().unwrap();
    for id in ids {
        ledger.add(&make_test_session(id)).unwrap();
    }
    Arc::new(Mutex::new(ledger))
}

/// Read the pending queue ids through a shared ledger.
pub fn pending_ids(ledger: &Arc<Mutex<Ledger>>) -> Vec<String> {
    ledger
        .lock()
        .unwrap()
        .pending_records()
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect()
}
