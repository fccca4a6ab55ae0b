// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sync`: one cycle, or the scheduler alone with `--watch`.

use tokio_util::sync::CancellationToken;

use super::cancel_on_ctrl_c;
use crate::cli::SyncArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::sync::RepoSynchronizer;
use crate::scheduler::SyncScheduler;

/// Synchronize the configured working copy.
///
/// # Errors
///
/// Without `--watch`, returns the sync failure. With `--watch`, failures are
/// logged and retried on the next interval.
pub async fn run_sync_command(args: &SyncArgs, config: &Config) -> Result<()> {
    let synchronizer = RepoSynchronizer::new(&config.repo.path, &config.repo.url);
    let scheduler = SyncScheduler::new(synchronizer, config.repo.sync_interval());

    if args.watch {
        let token = CancellationToken::new();
        let signal = cancel_on_ctrl_c(token.clone());
        scheduler.run(token).await;
        signal.abort();
        return Ok(());
    }

    let outcome = scheduler.run_once().await?;
    println!("{outcome}: {}", config.repo.path.display());
    Ok(())
}
