// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for portfolio-rs.
//!
//! ```text
//! Config
//!   repo    path, url, sync_interval_minutes
//!   server  addr, public_dir, data_dir, data_prefix
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_REPO_PATH: &str = "./data/portfolio";
pub const DEFAULT_REPO_URL: &str = "https://github.com/webbsalad/3-course";
pub const DEFAULT_SYNC_INTERVAL_MINUTES: u64 = 60;
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PUBLIC_DIR: &str = "./web/public";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_DATA_PREFIX: &str = "/data/";

/// Mirrored repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Local working copy directory.
    pub path: PathBuf,
    /// Remote repository URL (anything `git clone` accepts).
    pub url: String,
    /// Minutes between two synchronization cycles.
    pub sync_interval_minutes: u64,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPO_PATH),
            url: DEFAULT_REPO_URL.to_string(),
            sync_interval_minutes: DEFAULT_SYNC_INTERVAL_MINUTES,
        }
    }
}

impl RepoConfig {
    /// Synchronization interval as a [`Duration`].
    #[must_use]
    pub const fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_minutes.saturating_mul(60))
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "repo".to_string(),
                key: "url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.sync_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                section: "repo".to_string(),
                key: "sync_interval_minutes".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "repo".to_string(),
                key: "path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: String,
    /// Web UI directory served at `/`.
    pub public_dir: PathBuf,
    /// Pre-published assets served at `/data/`.
    pub data_dir: PathBuf,
    /// `path` prefix that switches the file query to static-asset mode.
    pub data_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            data_prefix: DEFAULT_DATA_PREFIX.to_string(),
        }
    }
}

impl ServerConfig {
    pub(crate) fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.data_prefix.starts_with('/') || !self.data_prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                section: "server".to_string(),
                key: "data_prefix".to_string(),
                message: format!("must start and end with '/', got '{}'", self.data_prefix),
            });
        }
        Ok(())
    }
}
