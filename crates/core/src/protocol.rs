// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Wire protocol for reconciling local sessions with the remote service.
//!
//! The protocol is a single request/response exchange:
//! - The client sends a batch of change entries, each tagged with a change
//!   kind and the client-generated identifier.
//! - The server replies with the subset of identifiers it durably accepted.
//!
//! The confirmed set is the only signal that clears pending-queue
//! membership. It may be a strict subset of what was submitted; omitted
//! identifiers stay pending and are retried on a later pass.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionExtras};

/// Kind of change carried by a [`ChangeEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Create-or-replace a session by its client identifier.
    SessionUpsert,
}

/// Current field values of a session, as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpsert {
    pub wallet_id: String,
    pub date: chrono::NaiveDate,
    pub location: String,
    pub buyin_amount: i64,
    pub cashout_amount: i64,
    pub hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Session> for SessionUpsert {
    fn from(session: &Session) -> Self {
        let SessionExtras {
            stakes,
            tips_minor,
            expenses_minor,
            notes,
        } = session.extras.clone();
        SessionUpsert {
            wallet_id: session.wallet_id.clone(),
            date: session.date,
            location: session.location.clone(),
            buyin_amount: session.buyin_minor,
            cashout_amount: session.cashout_minor,
            hours: session.hours,
            stakes,
            tips: tips_minor,
            expenses: expenses_minor,
            notes,
            created_at: session.created_at,
        }
    }
}

/// One entry in a sync batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Change kind tag.
    pub kind: ChangeKind,
    /// Client-generated session identifier (the idempotency key).
    pub client_id: String,
    /// Current field values at batch-build time.
    pub data: SessionUpsert,
}

impl ChangeEntry {
    /// Build an upsert entry from the session's current field values.
    pub fn upsert(session: &Session) -> Self {
        ChangeEntry {
            kind: ChangeKind::SessionUpsert,
            client_id: session.id.clone(),
            data: SessionUpsert::from(session),
        }
    }
}

/// A batch of pending changes submitted to the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Identifies the submitting client installation.
    pub originator: String,
    /// Ordered change entries, oldest queued first.
    pub changes: Vec<ChangeEntry>,
}

impl SyncRequest {
    /// Build a request from the given pending sessions.
    pub fn new(originator: impl Into<String>, sessions: &[Session]) -> Self {
        SyncRequest {
            originator: originator.into(),
            changes: sessions.iter().map(ChangeEntry::upsert).collect(),
        }
    }

    /// Client identifiers submitted in this request, in order.
    pub fn client_ids(&self) -> Vec<String> {
        self.changes.iter().map(|c| c.client_id.clone()).collect()
    }

    /// Serializes the request to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the request from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// The remote authority's reply to a [`SyncRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    /// Client identifiers the remote durably accepted.
    ///
    /// May be a strict subset of what was submitted; entries the remote
    /// rejected or only partially processed are simply omitted and remain
    /// pending on the client.
    pub confirmed: Vec<String>,
}

impl SyncResponse {
    /// Creates a response confirming the given identifiers.
    pub fn confirming(confirmed: Vec<String>) -> Self {
        SyncResponse { confirmed }
    }

    /// Serializes the response to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the response from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
