// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Trigger intake: a single-consumer queue of sync intents.
//!
//! Trigger sources (manual refresh, connectivity-regained notifications,
//! app-foreground events) never call the network themselves. They submit
//! an intent to this queue; one worker task consumes intents in order and
//! runs one pass per intent. Ordering and the single-flight guarantee are
//! structural, not conventions over ad hoc background futures.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::coordinator::SyncCoordinator;
use super::probe::ConnectivityProbe;
use super::transport::Transport;

/// Why a sync pass was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// Explicit user action (pull-to-refresh, sync button).
    Manual,
    /// Connectivity-regained notification.
    ConnectivityRegained,
    /// Application returned to the foreground.
    AppForeground,
}

impl SyncTrigger {
    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncTrigger::Manual => "manual",
            SyncTrigger::ConnectivityRegained => "connectivity_regained",
            SyncTrigger::AppForeground => "app_foreground",
        }
    }
}

/// Fire-and-forget handle for submitting sync intents.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<SyncTrigger>,
}

impl SyncHandle {
    /// Submit a sync intent.
    ///
    /// Infallible by design: a send after worker shutdown is dropped, the
    /// same way a trigger while offline is simply absorbed by the next pass.
    pub fn trigger(&self, trigger: SyncTrigger) {
        if self.tx.send(trigger).is_err() {
            tracing::debug!("sync worker gone, dropping {} trigger", trigger.as_str());
        }
    }
}

/// Spawn the single-consumer sync worker.
///
/// The worker runs one [`SyncCoordinator::run_sync`] pass per queued
/// trigger and exits when every [`SyncHandle`] has been dropped.
pub fn spawn_sync_worker<T, P>(
    coordinator: Arc<SyncCoordinator<T, P>>,
) -> (SyncHandle, JoinHandle<()>)
where
    T: Transport + 'static,
    P: ConnectivityProbe + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<SyncTrigger>();

    let handle = tokio::spawn(async move {
        while let Some(trigger) = rx.recv().await {
            tracing::debug!("sync triggered: {}", trigger.as_str());
            let report = coordinator.run_sync().await;
            tracing::debug!(
                "sync pass done: {:?}, {} confirmed",
                report.outcome,
                report.confirmed.len()
            );
        }
    });

    (SyncHandle { tx }, handle)
}
