// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! grind-sync: Offline-first synchronization for the grind session tracker.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   Trigger   │────►│ Coordinator  │────►│  Transport  │────► remote
//! │  (worker)   │     │ (run_sync)   │◄────│   (trait)   │◄──── endpoint
//! └─────────────┘     └──────┬───────┘     └─────────────┘
//!                            │ reads probe, builds batch,
//!                            ▼ reconciles confirmed ids
//!                     ┌─────────────┐
//!                     │   Ledger    │  (grind-core)
//!                     └─────────────┘
//! ```
//!
//! # Guarantees
//!
//! - At most one sync pass in flight: concurrent triggers collapse into
//!   no-ops rather than stacked requests.
//! - A pass never blocks local mutation; edits landing after batch-build
//!   ship on the next pass.
//! - Only server-confirmed identifiers leave the pending queue; any
//!   failure leaves the queue fully intact for at-least-once retry.

pub mod coordinator;
pub mod probe;
pub mod transport;
pub mod trigger;

pub use coordinator::{SyncConfig, SyncCoordinator, SyncError, SyncOutcome, SyncReport};
pub use probe::{ConnectivityProbe, TcpProbe};
pub use transport::{Transport, TransportError, WebSocketTransport};
pub use trigger::{spawn_sync_worker, SyncHandle, SyncTrigger};

#[cfg(test)]
mod test_helpers;
