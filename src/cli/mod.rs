// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for portfolio-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! portfolio [global options] [command]
//! serve [--addr ADDR]        (default)
//! sync [--watch]
//! tree [DIR] [--max-depth N] [--compact]
//! options
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Repository Portfolio Viewer
///
/// Mirrors a git repository to disk and serves its file tree over HTTP.
#[derive(Debug, Parser)]
#[command(
    name = "portfolio",
    author,
    version,
    about = "Repository Portfolio Viewer",
    long_about = "portfolio-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps a local working copy of a git repository in sync and\n\
                  serves its directory structure and file contents to the web\n\
                  viewer. Invoking `portfolio` without a command runs `serve`.",
    after_help = "ENVIRONMENT:\n\n\
                  PORTFOLIO_PATH, REPO_URL and SYNC_INTERVAL_MINUTES set the working\n\
                  copy, remote and interval. Any option can also be given as\n\
                  PORTFOLIO_<SECTION>__<KEY>, e.g. PORTFOLIO_SERVER__ADDR. A .env file\n\
                  in the working directory is read first and never overrides variables\n\
                  that are already set."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Runs the sync scheduler and the HTTP server.
    Serve(ServeArgs),

    /// Synchronizes the working copy once.
    Sync(SyncArgs),

    /// Prints the JSON tree of a directory.
    Tree(TreeArgs),
}

/// Arguments for `serve`.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Listen address, overrides server.addr.
    #[arg(short = 'a', long = "addr", value_name = "ADDR")]
    pub addr: Option<String>,

    /// Serve only; do not start the sync scheduler.
    #[arg(long = "no-sync")]
    pub no_sync: bool,
}

/// Arguments for `sync`.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Keep running and synchronize on every interval until interrupted.
    #[arg(short = 'w', long = "watch")]
    pub watch: bool,
}

/// Arguments for `tree`.
#[derive(Debug, Clone, Default, Args)]
pub struct TreeArgs {
    /// Directory to materialize (default: the working copy).
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Maximum depth below the root.
    #[arg(short = 'd', long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Print on a single line instead of pretty-printed.
    #[arg(long = "compact")]
    pub compact: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
