// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for portfolio-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. portfolio.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PORTFOLIO_<SECTION>__<KEY> env vars
//! 5. PORTFOLIO_PATH / REPO_URL / SYNC_INTERVAL_MINUTES
//! 6. CLI overrides
//! ```
//!
//! A `.env` file is read first and only fills variables that are unset.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{RepoConfig, ServerConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mirrored repository.
    pub repo: RepoConfig,
    /// HTTP server.
    pub server: ServerConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use portfolio_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("portfolio.toml")
    ///     .with_env_prefix("PORTFOLIO")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.repo.validate()?;
        self.server.validate()
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("repo.path", self.repo.path.display().to_string());
        options.insert("repo.url", self.repo.url.clone());
        options.insert(
            "repo.sync_interval_minutes",
            self.repo.sync_interval_minutes.to_string(),
        );
        options.insert("server.addr", self.server.addr.clone());
        options.insert(
            "server.public_dir",
            self.server.public_dir.display().to_string(),
        );
        options.insert("server.data_dir", self.server.data_dir.display().to_string());
        options.insert("server.data_prefix", self.server.data_prefix.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
