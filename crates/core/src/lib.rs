// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! grind-core: Shared library for the grind session tracker
//!
//! This crate provides the session data model, integer money arithmetic,
//! the SQLite-backed ledger with its pending-sync queue, and the wire
//! protocol used to reconcile local records with the remote service.

pub mod error;
pub mod ledger;
pub mod money;
pub mod protocol;
pub mod session;

pub use error::{Error, Result};
pub use ledger::Ledger;
pub use money::{format_minor_units, to_minor_units};
pub use protocol::{ChangeEntry, ChangeKind, SessionUpsert, SyncRequest, SyncResponse};
pub use session::{Session, SessionExtras};
