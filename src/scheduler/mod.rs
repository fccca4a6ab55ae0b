// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Periodic synchronization driver.
//!
//! ```text
//! SyncScheduler::new(synchronizer, interval)
//!   .run(token).await
//!       tick (immediate) --> spawn_blocking(sync) --> record --> tick ...
//!       token.cancelled()  --> stop
//! ```
//!
//! Cycles are strictly serialized: the next tick is not awaited until the
//! running cycle has returned. A failed cycle leaves the working copy as it
//! was and is retried on the next tick.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::{PortfolioError, Result};
use crate::git::backend::{GitMutation, ShellBackend};
use crate::git::sync::{RepoSynchronizer, SyncOutcome};

/// Result of the most recent cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastSync {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub finished_at_unix: u64,
}

/// Snapshot of scheduler progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub cycles: u64,
    pub failures: u64,
    pub last_sync: Option<LastSync>,
}

/// Shared, observational record of sync results.
#[derive(Debug, Default)]
pub struct SyncStatus {
    inner: RwLock<SyncReport>,
}

impl SyncStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current report.
    #[must_use]
    pub fn snapshot(&self) -> SyncReport {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Record one finished cycle.
    pub fn record(&self, result: std::result::Result<SyncOutcome, String>) {
        let finished_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let mut report = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        report.cycles += 1;
        let last = match result {
            Ok(outcome) => LastSync {
                ok: true,
                outcome: Some(outcome.to_string()),
                error: None,
                finished_at_unix,
            },
            Err(message) => {
                report.failures += 1;
                LastSync {
                    ok: false,
                    outcome: None,
                    error: Some(message),
                    finished_at_unix,
                }
            }
        };
        report.last_sync = Some(last);
    }
}

/// Drives a [`RepoSynchronizer`] on a fixed interval.
pub struct SyncScheduler<M = ShellBackend> {
    synchronizer: Arc<RepoSynchronizer<M>>,
    interval: Duration,
    status: Arc<SyncStatus>,
}

impl<M: GitMutation + 'static> SyncScheduler<M> {
    /// Creates a scheduler with a fresh [`SyncStatus`].
    #[must_use]
    pub fn new(synchronizer: RepoSynchronizer<M>, interval: Duration) -> Self {
        Self {
            synchronizer: Arc::new(synchronizer),
            interval,
            status: Arc::new(SyncStatus::new()),
        }
    }

    /// Shares an existing status record.
    #[must_use]
    pub fn with_status(mut self, status: Arc<SyncStatus>) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn status(&self) -> Arc<SyncStatus> {
        Arc::clone(&self.status)
    }

    /// Runs one cycle on the blocking pool and records its result.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails or its blocking task panics.
    pub async fn run_once(&self) -> Result<SyncOutcome> {
        let synchronizer = Arc::clone(&self.synchronizer);
        let result = tokio::task::spawn_blocking(move || synchronizer.sync())
            .await
            .context("sync task panicked")
            .and_then(|r| r.map_err(|e| PortfolioError::from(e).into()));

        match &result {
            Ok(outcome) => {
                self.status.record(Ok(*outcome));
            }
            Err(e) => {
                error!(
                    url = %self.synchronizer.url(),
                    path = %self.synchronizer.path().display(),
                    error = %format!("{e:#}"),
                    "sync failed"
                );
                self.status.record(Err(format!("{e:#}")));
            }
        }
        result
    }

    /// Runs the initial sync immediately, then one cycle per interval until
    /// `token` is cancelled. A cycle in progress finishes before the loop stops.
    pub async fn run(self, token: CancellationToken) {
        info!(
            url = %self.synchronizer.url(),
            path = %self.synchronizer.path().display(),
            interval_secs = self.interval.as_secs(),
            "sync scheduler started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            // failures are recorded and logged inside run_once
            let _ = self.run_once().await;
        }

        info!("sync scheduler stopped");
    }
}
