// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Sync coordinator: drives at most one synchronization pass at a time.
//!
//! A pass reads the pending queue through the ledger, submits the batch
//! through the transport, and reconciles the server-confirmed identifiers
//! back into the ledger. Any failure leaves the queue fully intact; the
//! next trigger simply retries. Errors never escape [`SyncCoordinator::run_sync`]
//! as panics or `Err` — a background sync attempt must never crash the caller.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use grind_core::protocol::SyncRequest;
use grind_core::Ledger;

use super::probe::ConnectivityProbe;
use super::transport::{Transport, TransportError, WebSocketTransport};

/// Configuration for the sync coordinator.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// URL of the remote sync endpoint.
    pub url: String,
    /// Originator tag identifying this client installation.
    pub originator: String,
    /// Maximum number of change entries per pass. Remaining pending
    /// records ship on subsequent passes.
    pub max_batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            url: "ws://localhost:7890".to_string(),
            originator: "grind-client".to_string(),
            max_batch_size: 100,
        }
    }
}

/// Error captured during a sync pass.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Transport or protocol failure during submission.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Ledger failure while building the batch or reconciling.
    #[error("ledger error: {0}")]
    Ledger(#[from] grind_core::Error),
}

/// How a sync pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another pass was already in flight; nothing was submitted.
    AlreadyRunning,
    /// The connectivity probe reported the remote as unreachable.
    Offline,
    /// The pending queue was empty; no request was made.
    NothingPending,
    /// A batch was submitted and the confirmed set reconciled.
    Completed,
    /// Submission or reconciliation failed; the queue is intact.
    Failed,
}

/// Result of a single sync pass.
#[derive(Debug)]
pub struct SyncReport {
    /// How the pass ended.
    pub outcome: SyncOutcome,
    /// Identifiers the server confirmed in this pass. Empty unless
    /// the outcome is [`SyncOutcome::Completed`].
    pub confirmed: BTreeSet<String>,
    /// The captured error, when the outcome is [`SyncOutcome::Failed`].
    pub error: Option<SyncError>,
}

impl SyncReport {
    fn skipped(outcome: SyncOutcome) -> Self {
        SyncReport {
            outcome,
            confirmed: BTreeSet::new(),
            error: None,
        }
    }

    fn failed(error: SyncError) -> Self {
        SyncReport {
            outcome: SyncOutcome::Failed,
            confirmed: BTreeSet::new(),
            error: Some(error),
        }
    }
}

/// Clears the in-flight flag on every exit path, including early returns.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Orchestrates synchronization passes against the remote endpoint.
///
/// The coordinator never owns session data; it reads the ledger at
/// submission time and writes back only server-confirmed identifiers.
/// The in-flight flag is owned by the instance, so independent
/// coordinators can be tested in isolation.
pub struct SyncCoordinator<T: Transport, P: ConnectivityProbe> {
    config: SyncConfig,
    ledger: Arc<Mutex<Ledger>>,
    probe: P,
    transport: tokio::sync::Mutex<T>,
    in_flight: AtomicBool,
}

impl<P: ConnectivityProbe> SyncCoordinator<WebSocketTransport, P> {
    /// Create a coordinator with the default WebSocket transport.
    pub fn new(config: SyncConfig, ledger: Arc<Mutex<Ledger>>, probe: P) -> Self {
        let transport = WebSocketTransport::new(config.url.clone());
        Self::with_transport(config, ledger, probe, transport)
    }
}

impl<T: Transport, P: ConnectivityProbe> SyncCoordinator<T, P> {
    /// Create a coordinator with a custom transport (for testing).
    pub fn with_transport(
        config: SyncConfig,
        ledger: Arc<Mutex<Ledger>>,
        probe: P,
        transport: T,
    ) -> Self {
        SyncCoordinator {
            config,
            ledger,
            probe,
            transport: tokio::sync::Mutex::new(transport),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a pass is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn lock_ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a single synchronization pass.
    ///
    /// Redundant concurrent calls are idempotent no-ops: if a pass is
    /// already in flight the report says so and nothing is submitted.
    /// The ledger lock is never held across network I/O, so local
    /// mutations interleave freely with a pass; an edit landing after
    /// batch-build ships on the next pass.
    pub async fn run_sync(&self) -> SyncReport {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("sync pass already in flight, skipping");
            return SyncReport::skipped(SyncOutcome::AlreadyRunning);
        }
        let _guard = InFlightGuard(&self.in_flight);

        if !self.probe.is_reachable() {
            tracing::debug!("remote unreachable, leaving queue untouched");
            return SyncReport::skipped(SyncOutcome::Offline);
        }

        // Live read: the batch carries field values as of right now.
        let request = {
            let ledger = self.lock_ledger();
            let mut pending = match ledger.pending_records() {
                Ok(pending) => pending,
                Err(e) => {
                    tracing::warn!("failed to read pending queue: {e}");
                    return SyncReport::failed(e.into());
                }
            };
            if pending.is_empty() {
                return SyncReport::skipped(SyncOutcome::NothingPending);
            }
            pending.truncate(self.config.max_batch_size);
            SyncRequest::new(self.config.originator.clone(), &pending)
        };

        let submitted = request.changes.len();
        let response = {
            let mut transport = self.transport.lock().await;
            transport.submit(request).await
        };

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("sync submission failed, queue left intact: {e}");
                return SyncReport::failed(e.into());
            }
        };

        // Only the confirmed set clears queue membership; identifiers the
        // server omitted stay pending and retry on the next pass. Ids
        // deleted locally mid-flight are ignored by the ledger.
        {
            let mut ledger = self.lock_ledger();
            if let Err(e) = ledger.mark_synced(&response.confirmed) {
                tracing::warn!("failed to reconcile confirmed ids: {e}");
                return SyncReport::failed(e.into());
            }
        }

        let confirmed: BTreeSet<String> = response.confirmed.into_iter().collect();
        tracing::info!(
            "sync pass confirmed {} of {} submitted",
            confirmed.len(),
            submitted
        );

        SyncReport {
            outcome: SyncOutcome::Completed,
            confirmed,
            error: None,
        }
    }
}
