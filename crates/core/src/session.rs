// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Core session types for the grind tracker.
//!
//! A [`Session`] is a single client-originated fact: one sitting at the
//! tables, owned by a wallet (bankroll). Its `id` is assigned once at
//! creation and doubles as the idempotency key for remote sync.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Optional per-session details with a fixed, documented key set.
///
/// These travel on the wire alongside the required fields. Keeping the set
/// closed (rather than an open metadata map) keeps the wire contract stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExtras {
    /// Table stakes, e.g. "1/2" or "2/5".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakes: Option<String>,
    /// Dealer tips in minor currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips_minor: Option<i64>,
    /// Incidental expenses (travel, food) in minor currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses_minor: Option<i64>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Client-generated, globally unique, immutable identifier.
    ///
    /// Assigned once at creation and never changed; this is the sole
    /// correlation key between local and remote representations, across
    /// every sync retry.
    pub id: String,
    /// Owning bankroll. Foreign reference, not an ownership relation.
    pub wallet_id: String,
    /// Calendar date the session was played.
    pub date: NaiveDate,
    /// Venue or site name.
    pub location: String,
    /// Buy-in amount in minor currency units.
    pub buyin_minor: i64,
    /// Cash-out amount in minor currency units.
    pub cashout_minor: i64,
    /// Hours played.
    pub hours: f64,
    /// Optional details (stakes, tips, expenses, notes).
    #[serde(default)]
    pub extras: SessionExtras,
    /// Local creation timestamp. Immutable.
    pub created_at: DateTime<Utc>,
    /// Remote confirmation timestamp.
    ///
    /// `None` until the remote authority has durably accepted the record.
    /// Once set it is never cleared by a later local edit.
    pub synced_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new unsynced session with `created_at` set to now.
    pub fn new(
        id: impl Into<String>,
        wallet_id: impl Into<String>,
        date: NaiveDate,
        location: impl Into<String>,
        buyin_minor: i64,
        cashout_minor: i64,
        hours: f64,
    ) -> Self {
        Session {
            id: id.into(),
            wallet_id: wallet_id.into(),
            date,
            location: location.into(),
            buyin_minor,
            cashout_minor,
            hours,
            extras: SessionExtras::default(),
            created_at: Utc::now(),
            synced_at: None,
        }
    }

    /// Net result in minor units: cashout minus buy-in, tips, and expenses.
    pub fn net_minor(&self) -> i64 {
        self.cashout_minor
            - self.buyin_minor
            - self.extras.tips_minor.unwrap_or(0)
            - self.extras.expenses_minor.unwrap_or(0)
    }

    /// Whether the remote authority has confirmed this record.
    pub fn is_synced(&self) -> bool {
        self.synced_at.is_some()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
