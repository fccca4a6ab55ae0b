// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging setup on the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |       |
//!    v       v
//! console   file (--log-file)
//! stderr    non_blocking, append
//!           text | json lines
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! LogLevel:  0=off  1=error  2=warn  3=info
//!            4=debug  5=trace  6=trace everything (axum, hyper, gix)
//! ```
//!
//! Sync, tree and query events carry `path`, `url` and `error` as structured
//! fields so the JSON file output can be filtered per working copy.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::error::{ConfigError, Result};

/// Targets that follow the configured level; everything else stays at `warn`
/// until [`LogLevel::EVERYTHING`].
const OWN_TARGETS: [&str; 2] = ["portfolio", "portfolio_rs"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Verbosity 0-6, as accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogLevel(u8);

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const EVERYTHING: Self = Self(6);

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `level` is greater than 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(level).ok_or_else(|| ConfigError::InvalidValue {
            section: "log".to_string(),
            key: "level".to_string(),
            message: format!("log level must be 0-6, got {level}"),
        })
    }

    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 6 { Some(Self(level)) } else { None }
    }

    const fn name(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }

    /// `EnvFilter` directives for this level.
    ///
    /// Dependencies are capped at `warn` up to level 5, so request handling
    /// and gix internals do not drown the sync log.
    #[must_use]
    pub fn directives(self) -> String {
        if self.0 <= Self::WARN.0 || self.0 >= Self::EVERYTHING.0 {
            return self.name().to_string();
        }
        let mut directives = String::from("warn");
        for target in OWN_TARGETS {
            directives.push(',');
            directives.push_str(target);
            directives.push('=');
            directives.push_str(self.name());
        }
        directives
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

/// Console and optional file output settings.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::DEBUG)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file), into)]
    log_file: Option<PathBuf>,
    #[builder(setters(name = with_json_file), default = false)]
    json_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Whether the file layer writes one JSON object per event.
    #[must_use]
    pub const fn json_file(&self) -> bool {
        self.json_file
    }
}

/// Keeps the file writer alive; pending lines are flushed on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive until the process exits.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
///
/// # Example
///
/// ```no_run
/// use portfolio_rs::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::DEBUG)
///     .with_log_file("logs/portfolio.log")
///     .build();
///
/// let _guard = init_logging(&config).expect("logging");
/// tracing::info!(path = "data/portfolio", "ready");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let mut layers = vec![console_layer(config.console_level())];

    let file_guard = match config.log_file() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            layers.push(file_layer(writer, config.file_level(), config.json_file()));
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn console_layer(level: LogLevel) -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(level >= LogLevel::DEBUG)
        .with_filter(level.filter())
        .boxed()
}

fn file_layer(writer: NonBlocking, level: LogLevel, json: bool) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(level.filter())
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(level.filter())
            .boxed()
    }
}

/// Opens `path` for appending, creating missing parent directories.
pub(crate) fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests;
