// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `serve`: sync scheduler and HTTP server sharing one shutdown token.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::cancel_on_ctrl_c;
use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::sync::RepoSynchronizer;
use crate::scheduler::{SyncScheduler, SyncStatus};
use crate::server::{AppState, serve};

/// Run the scheduler and the server until interrupted.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or serving fails.
/// Sync failures are logged and never end the command.
pub async fn run_serve_command(args: &ServeArgs, config: &Config) -> Result<()> {
    let addr = args.addr.as_deref().unwrap_or(&config.server.addr);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let token = CancellationToken::new();
    let signal = cancel_on_ctrl_c(token.clone());
    let status = Arc::new(SyncStatus::new());

    let scheduler = if args.no_sync {
        info!("sync scheduler disabled");
        None
    } else {
        let synchronizer = RepoSynchronizer::new(&config.repo.path, &config.repo.url);
        let scheduler = SyncScheduler::new(synchronizer, config.repo.sync_interval())
            .with_status(Arc::clone(&status));
        Some(tokio::spawn(scheduler.run(token.clone())))
    };

    let state = Arc::new(AppState::from_config(config, status));
    let served = serve(listener, state, token.clone()).await;

    token.cancel();
    if let Some(handle) = scheduler
        && let Err(e) = handle.await
    {
        warn!(error = %e, "sync scheduler task failed");
    }
    signal.abort();
    served
}
