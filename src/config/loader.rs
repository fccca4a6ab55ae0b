// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration sources.
//!
//! ```text
//! lowest                                                   highest
//!   defaults < TOML files < PORTFOLIO_* env < legacy env < CLI flags
//!              (in order)   SECTION__KEY     PORTFOLIO_PATH
//!                                            REPO_URL
//!                                            SYNC_INTERVAL_MINUTES
//! ```
//!
//! Files and the prefixed environment are `config` sources; legacy variables
//! and flags are overrides, applied in the order they are set.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use tracing::{debug, info, warn};

use super::Config;
use crate::error::{ConfigError, PortfolioError, Result};

/// Unprefixed variable for `repo.path`.
pub const ENV_PORTFOLIO_PATH: &str = "PORTFOLIO_PATH";
/// Unprefixed variable for `repo.url`.
pub const ENV_REPO_URL: &str = "REPO_URL";
/// Unprefixed variable for `repo.sync_interval_minutes`.
pub const ENV_SYNC_INTERVAL_MINUTES: &str = "SYNC_INTERVAL_MINUTES";

/// A TOML source that contributed to the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File that must exist.
    Required(PathBuf),
    /// File that was present when added.
    Optional(PathBuf),
    /// TOML given as a string.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[inline] <string>"),
        }
    }
}

/// Collects configuration sources and builds a validated [`Config`].
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Adds a TOML file; `build()` fails if it is missing or malformed.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.sources.push(ConfigSource::Required(path.to_path_buf()));
        self.add_file(path, true)
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        if path.is_file() {
            self.sources.push(ConfigSource::Optional(path.to_path_buf()));
        }
        self.add_file(path, false)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables, e.g. `PORTFOLIO_SERVER__ADDR`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Applies `PORTFOLIO_PATH`, `REPO_URL` and `SYNC_INTERVAL_MINUTES`.
    ///
    /// `lookup` is usually `|name| std::env::var(name).ok()`. Empty values
    /// count as unset. An unparsable interval is ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn with_legacy_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(path) = get(ENV_PORTFOLIO_PATH) {
            debug!(%path, "{ENV_PORTFOLIO_PATH} set");
            self = self.set("repo.path", path)?;
        }
        if let Some(url) = get(ENV_REPO_URL) {
            debug!(%url, "{ENV_REPO_URL} set");
            self = self.set("repo.url", url)?;
        }
        if let Some(raw) = get(ENV_SYNC_INTERVAL_MINUTES) {
            match raw.trim().parse::<u64>() {
                Ok(minutes) => {
                    info!(minutes, "{ENV_SYNC_INTERVAL_MINUTES} set");
                    self = self.set("repo.sync_interval_minutes", minutes)?;
                }
                Err(e) => {
                    warn!(value = %raw, error = %e, "ignoring unparsable {ENV_SYNC_INTERVAL_MINUTES}");
                }
            }
        }
        Ok(self)
    }

    /// Overrides `key` above every file and environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a valid configuration path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .with_context(|| format!("invalid override key '{key}'"))?;
        Ok(self)
    }

    /// Merges all sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or malformed, a value
    /// has the wrong type, or validation fails (empty URL, zero interval,
    /// malformed prefix).
    pub fn build(self) -> Result<Config> {
        let origin = self.origin();
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder
            .build()
            .and_then(|merged| merged.try_deserialize::<Config>())
            .map_err(|e| {
                PortfolioError::from(ConfigError::ParseError {
                    path: origin,
                    message: e.to_string(),
                })
            })?;
        config.validate().map_err(PortfolioError::from)?;
        Ok(config)
    }

    /// Names the sources a parse failure may come from.
    fn origin(&self) -> String {
        let mut names: Vec<String> = self
            .sources
            .iter()
            .map(|source| match source {
                ConfigSource::Required(path) | ConfigSource::Optional(path) => {
                    path.display().to_string()
                }
                ConfigSource::Inline => "<string>".to_string(),
            })
            .collect();
        if let Some(prefix) = &self.env_prefix {
            names.push(format!("{prefix}_* environment"));
        }
        if names.is_empty() {
            "<defaults>".to_string()
        } else {
            names.join(", ")
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered, one line per source.
    #[must_use]
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// What [`load_dotenv`] found.
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    NotFound,
    Failed(dotenvy::Error),
}

/// Loads `.env` from the current directory or its parents.
///
/// Variables already present in the process environment are left alone.
/// Runs before logging is up, so the caller reports the status.
#[must_use]
pub fn load_dotenv() -> DotenvStatus {
    match dotenvy::dotenv() {
        Ok(path) => DotenvStatus::Loaded(path),
        Err(e) if e.not_found() => DotenvStatus::NotFound,
        Err(e) => DotenvStatus::Failed(e),
    }
}
