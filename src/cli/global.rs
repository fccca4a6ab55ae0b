// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     <- additional TOML files (can repeat)
//! --log-level N     <- console verbosity (0-6)
//! --file-log-level  <- file verbosity (falls back to --log-level)
//! --log-file FILE   <- append log events to FILE
//! --log-json        <- FILE gets JSON lines instead of text
//! --repo-path DIR   <- repo.path
//! --repo-url URL    <- repo.url
//! --interval MIN    <- repo.sync_interval_minutes
//!
//! Precedence: CLI flags > legacy env > PORTFOLIO_* env > --config > portfolio.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Config file looked up in the working directory unless disabled.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Do not load `portfolio.toml` from the working directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", env = "PORTFOLIO_LOG_LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6), global = true)]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", env = "PORTFOLIO_FILE_LOG_LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6), global = true)]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", env = "PORTFOLIO_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as one JSON object per line.
    #[arg(long = "log-json", env = "PORTFOLIO_LOG_JSON", global = true)]
    pub log_json: bool,

    /// Local working copy directory.
    #[arg(long = "repo-path", value_name = "DIR", global = true)]
    pub repo_path: Option<PathBuf>,

    /// Remote repository URL.
    #[arg(long = "repo-url", value_name = "URL", global = true)]
    pub repo_url: Option<String>,

    /// Minutes between synchronization cycles.
    #[arg(long = "interval", value_name = "MINUTES",
        value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub interval: Option<u64>,
}

impl GlobalOptions {
    /// Configuration overrides as `(key, value)` pairs.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if let Some(ref path) = self.repo_path {
            overrides.push(("repo.path", path.display().to_string().into()));
        }
        if let Some(ref url) = self.repo_url {
            overrides.push(("repo.url", url.clone().into()));
        }
        if let Some(minutes) = self.interval {
            overrides.push(("repo.sync_interval_minutes", minutes.into()));
        }

        overrides
    }

    /// Builds a loader with every configuration source in precedence order.
    ///
    /// `lookup` resolves the legacy environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn config_loader<F>(&self, lookup: F) -> Result<ConfigLoader>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix("PORTFOLIO").with_legacy_env(lookup)?;

        for (key, value) in self.to_config_overrides() {
            loader = loader.set(key, value)?;
        }
        Ok(loader)
    }
}
