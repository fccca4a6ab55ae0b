// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        PortfolioError (16 bytes)
//!                |
//!      +---------+---------+
//!      v         v         v
//!    Tree      Sync      Config
//!    Box       Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Tree    PathUnavailable, NotADirectory
//!   Sync    DirectoryCreateFailed, CloneFailed, PullFailed, OpenFailed,
//!           GitUnavailable
//!   Config  ParseError, InvalidValue
//!
//! Nested, never top-level:
//!   Query   AccessDenied, FileNotFound, MissingPath, Tree   -> HTTP response
//!   Git     Gix, CommandFailed, RepositoryExists,
//!           AlreadyUpToDate, Process                        -> inside Sync
//!   Process ExecutableNotFound, SpawnFailed                 -> inside Git
//! ```
//!
//! Tree Builder swallows per-entry failures and only surfaces root-level
//! ones. The synchronizer surfaces everything except the two idempotent
//! git outcomes. Query errors carry an HTTP status via
//! [`QueryError::status_code`].

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Failures that reach a command handler.
///
/// Sub-errors are boxed so the enum stays two words wide.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Tree materialization failed at the root.
    #[error("tree error: {0}")]
    Tree(#[from] Box<TreeError>),

    /// Repository synchronization failed.
    #[error("sync error: {0}")]
    Sync(#[from] Box<SyncError>),

    /// Configuration could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PortfolioError {
                fn from(err: $error) -> Self {
                    PortfolioError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    TreeError => Tree,
    SyncError => Sync,
    ConfigError => Config,
}

// --- Tree Errors ---

/// Root-level tree materialization errors.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The root path does not exist or its metadata/listing cannot be read.
    #[error("path unavailable: {path}: {source}")]
    PathUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl TreeError {
    pub(crate) fn unavailable(path: &Path, source: std::io::Error) -> Self {
        Self::PathUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }
}

// --- Sync Errors ---

/// Repository synchronization errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Parent or working-copy directory could not be created, removed or recreated.
    #[error("failed to prepare directory {path}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fresh clone failed.
    #[error("clone of {url} failed: {source}")]
    CloneFailed {
        url: String,
        #[source]
        source: GitError,
    },

    /// Existing working copy could not be opened.
    #[error("failed to open working copy {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    /// Incremental update failed.
    #[error("pull into {path} failed: {source}")]
    PullFailed {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    /// Git cannot be run at all, so nothing was touched.
    #[error("git unavailable: {0}")]
    GitUnavailable(#[source] GitError),
}

// --- Query Errors ---

/// Errors answering structure and file-content queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request resolves outside the directory it is confined to.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The requested file does not exist or cannot be read.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The request is missing its `path` parameter.
    #[error("path parameter required")]
    MissingPath,

    /// Structure could not be produced.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl QueryError {
    /// HTTP status code reflecting the error taxonomy.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AccessDenied(_) => 403,
            Self::FileNotFound(_) => 404,
            Self::MissingPath => 400,
            Self::Tree(_) => 500,
        }
    }
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to read head: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Failed to peel HEAD to a commit id.
    #[error("failed to resolve head commit: {0}")]
    HeadId(#[from] Box<gix::reference::head_id::Error>),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone destination is already an initialized repository.
    #[error("repository already exists at {path}")]
    RepositoryExists { path: String },

    /// Pull found nothing to fetch.
    #[error("already up to date")]
    AlreadyUpToDate,

    /// The git executable could not be located or started.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl GitError {
    /// Whether this outcome is an idempotent success for the synchronizer.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::RepositoryExists { .. } | Self::AlreadyUpToDate)
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read, parsed or deserialized.
    #[error("failed to load config from {path}: {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
