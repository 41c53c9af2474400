// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! SQLite-backed ledger for session storage and the pending-sync queue.
//!
//! The [`Ledger`] is the single source of truth for session records. The
//! `pending_sync` table holds identifiers only, never record data: a batch
//! is always resolved against the latest session rows, so an edit made
//! before a sync pass ships the current field values, not a stale snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::error::{Error, Result};
use crate::session::{Session, SessionExtras};

/// SQL schema for the ledger database.
pub const SCHEMA: &str = r#"
-- Session records. Monetary columns are integer minor currency units.
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    wallet_id TEXT NOT NULL,
    date TEXT NOT NULL,
    location TEXT NOT NULL,
    buyin_minor INTEGER NOT NULL,
    cashout_minor INTEGER NOT NULL,
    hours REAL NOT NULL,
    stakes TEXT,
    tips_minor INTEGER,
    expenses_minor INTEGER,
    notes TEXT,
    created_at TEXT NOT NULL,
    synced_at TEXT
);

-- Pending-sync queue: identifiers awaiting remote confirmation, ordered
-- by insertion (rowid). The PRIMARY KEY rules out duplicate entries.
CREATE TABLE IF NOT EXISTS pending_sync (
    session_id TEXT PRIMARY KEY,
    FOREIGN KEY (session_id) REFERENCES sessions(id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_sessions_wallet ON sessions(wallet_id);
CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);
"#;

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(value: &str, column: &str) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse an ISO date from the database.
fn parse_date(value: &str) -> std::result::Result<NaiveDate, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid date '{value}' in column 'date'"
            ))),
        )
    })
}

/// Map a full session row (SELECT column order below) to a [`Session`].
fn row_to_session(row: &Row<'_>) -> std::result::Result<Session, rusqlite::Error> {
    let date: String = row.get(2)?;
    let created_at: String = row.get(11)?;
    let synced_at: Option<String> = row.get(12)?;

    Ok(Session {
        id: row.get(0)?,
        wallet_id: row.get(1)?,
        date: parse_date(&date)?,
        location: row.get(3)?,
        buyin_minor: row.get(4)?,
        cashout_minor: row.get(5)?,
        hours: row.get(6)?,
        extras: SessionExtras {
            stakes: row.get(7)?,
            tips_minor: row.get(8)?,
            expenses_minor: row.get(9)?,
            notes: row.get(10)?,
        },
        created_at: parse_timestamp(&created_at, "created_at")?,
        synced_at: match synced_at {
            Some(s) => Some(parse_timestamp(&s, "synced_at")?),
            None => None,
        },
    })
}

const SESSION_COLUMNS: &str = "id, wallet_id, date, location, buyin_minor, cashout_minor, \
     hours, stakes, tips_minor, expenses_minor, notes, created_at, synced_at";

/// The local authoritative store of sessions and their sync status.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open (or create) a ledger at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Ledger { conn })
    }

    /// Open an in-memory ledger. State is lost on drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Ledger { conn })
    }

    /// Insert a new session and append its id to the pending queue.
    ///
    /// Both happen in one transaction: a record never exists without
    /// having entered the queue. Fails with [`Error::DuplicateId`] if the
    /// id is already present.
    pub fn add(&mut self, session: &Session) -> Result<()> {
        let tx = self.conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT COUNT(*) > 0 FROM sessions WHERE id = ?1",
            [&session.id],
            |row| row.get(0),
        )?;
        if exists {
            return Err(Error::DuplicateId(session.id.clone()));
        }

        tx.execute(
            "INSERT INTO sessions (id, wallet_id, date, location, buyin_minor, cashout_minor, \
             hours, stakes, tips_minor, expenses_minor, notes, created_at, synced_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                session.id,
                session.wallet_id,
                session.date.to_string(),
                session.location,
                session.buyin_minor,
                session.cashout_minor,
                session.hours,
                session.extras.stakes,
                session.extras.tips_minor,
                session.extras.expenses_minor,
                session.extras.notes,
                session.created_at.to_rfc3339(),
                session.synced_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        tx.execute(
            "INSERT INTO pending_sync (session_id) VALUES (?1)",
            [&session.id],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Replace a session's mutable fields by id.
    ///
    /// Queue membership, `created_at`, and `synced_at` are untouched: an
    /// edit to an already-confirmed record does not reset its sync marker,
    /// and re-syncing an edit is an explicit decision via [`Ledger::requeue`].
    pub fn update(&mut self, session: &Session) -> Result<()> {
        self.conn.execute(
            "UPDATE sessions SET wallet_id = ?1, date = ?2, location = ?3, buyin_minor = ?4, \
             cashout_minor = ?5, hours = ?6, stakes = ?7, tips_minor = ?8, expenses_minor = ?9, \
             notes = ?10 WHERE id = ?11",
            params![
                session.wallet_id,
                session.date.to_string(),
                session.location,
                session.buyin_minor,
                session.cashout_minor,
                session.hours,
                session.extras.stakes,
                session.extras.tips_minor,
                session.extras.expenses_minor,
                session.extras.notes,
                session.id,
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::SessionNotFound(session.id.clone()));
        }
        Ok(())
    }

    /// Delete a session and its queue entry atomically.
    ///
    /// Fails with [`Error::SessionNotFound`] if absent; on failure nothing
    /// is deleted.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM pending_sync WHERE session_id = ?1", [id])?;
        let deleted = tx.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::SessionNotFound(id.to_string()));
        }

        tx.commit()?;
        Ok(())
    }

    /// Explicitly re-enter an existing session into the pending queue.
    ///
    /// This is the re-sync decision point for edits made after a record was
    /// confirmed. Idempotent: requeueing an already-pending id is a no-op.
    pub fn requeue(&mut self, id: &str) -> Result<()> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sessions WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(Error::SessionNotFound(id.to_string()));
        }

        self.conn.execute(
            "INSERT OR IGNORE INTO pending_sync (session_id) VALUES (?1)",
            [id],
        )?;
        Ok(())
    }

    /// Sessions currently awaiting sync, resolved against the latest ledger
    /// rows in queue order. Never a stale copy.
    pub fn pending_records(&self) -> Result<Vec<Session>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions \
             JOIN pending_sync ON pending_sync.session_id = sessions.id \
             ORDER BY pending_sync.rowid"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map([], row_to_session)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    /// Number of sessions awaiting sync (for "pending" UI badges).
    pub fn pending_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pending_sync", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Record remote confirmation for the given identifiers.
    ///
    /// For each id present in the ledger, sets `synced_at` to now if unset
    /// and removes the id from the pending queue. Ids not found (deleted
    /// locally after being queued) are silently skipped: the user's delete
    /// intent wins over a stale server confirmation. Idempotent.
    pub fn mark_synced(&mut self, ids: &[String]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for id in ids {
            tx.execute(
                "UPDATE sessions SET synced_at = COALESCE(synced_at, ?1) WHERE id = ?2",
                params![now, id],
            )?;
            tx.execute("DELETE FROM pending_sync WHERE session_id = ?1", [id])?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Fetch a session by id.
    pub fn get(&self, id: &str) -> Result<Session> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map([id], row_to_session)?;
        match rows.next() {
            Some(row) => Ok(row?),
            None => Err(Error::SessionNotFound(id.to_string())),
        }
    }

    /// Whether a session exists in the ledger.
    pub fn contains(&self, id: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sessions WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// All sessions, newest date first. Read access for derived views.
    pub fn all_sessions(&self) -> Result<Vec<Session>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY date DESC, created_at DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map([], row_to_session)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
