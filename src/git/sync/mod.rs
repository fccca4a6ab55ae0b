// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-copy synchronization.
//!
//! ```text
//!   sync()
//!     |
//!     +-- create parent + working copy dirs
//!     |
//!     +-- <path>/.git exists?
//!           |                      |
//!           no (Absent)            yes (Present)
//!           |                      |
//!           remove_dir_all         open worktree (gix)
//!           create_dir_all         git pull --ff-only
//!           git clone              |
//!           |                      +-- "already up to date" -> UpToDate
//!           +-- "already exists"   +-- otherwise           -> Updated
//!                -> AlreadyCloned
//! ```
//!
//! Any state without the marker is treated as a discardable partial clone,
//! so a crash mid-clone heals on the next cycle. There is no retry inside a
//! single call; the scheduler owns the cadence.

use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::METADATA_MARKER;
use super::backend::{GitMutation, GitQuery, GixBackend, ShellBackend};
use crate::error::SyncError;

/// On-disk state of the working copy, inferred from the metadata marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// No marker: the next sync clones from scratch.
    Absent,
    /// Marker present: the next sync pulls in place.
    Present,
}

/// Successful result of one synchronization cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fresh clone completed.
    Cloned,
    /// Clone reported the destination was already a repository.
    AlreadyCloned,
    /// Pull brought in new commits.
    Updated,
    /// Pull found nothing new.
    UpToDate,
}

impl SyncOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloned => "cloned",
            Self::AlreadyCloned => "already-cloned",
            Self::Updated => "updated",
            Self::UpToDate => "up-to-date",
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps one local working copy mirrored from one remote URL.
///
/// Generic over the mutation backend so tests can substitute clone/pull.
pub struct RepoSynchronizer<M = ShellBackend> {
    path: PathBuf,
    url: String,
    _backend: PhantomData<fn() -> M>,
}

impl<M> fmt::Debug for RepoSynchronizer<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoSynchronizer")
            .field("path", &self.path)
            .field("url", &self.url)
            .finish()
    }
}

impl RepoSynchronizer<ShellBackend> {
    /// Synchronizer using the git CLI.
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self::with_backend(path, url)
    }
}

impl<M: GitMutation> RepoSynchronizer<M> {
    /// Synchronizer using the mutation backend `M`.
    pub fn with_backend(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            _backend: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current on-disk state.
    #[must_use]
    pub fn state(&self) -> RepoState {
        if self.path.join(METADATA_MARKER).exists() {
            RepoState::Present
        } else {
            RepoState::Absent
        }
    }

    /// Run one synchronization cycle.
    ///
    /// # Errors
    ///
    /// - [`SyncError::DirectoryCreateFailed`] if the working copy cannot be
    ///   created, removed or recreated
    /// - [`SyncError::GitUnavailable`] if the backend cannot run
    /// - [`SyncError::CloneFailed`] / [`SyncError::PullFailed`] for git failures
    ///   other than the two idempotent outcomes
    /// - [`SyncError::OpenFailed`] if an existing working copy cannot be opened
    pub fn sync(&self) -> Result<SyncOutcome, SyncError> {
        self.ensure_dirs()?;
        M::ensure_available().map_err(SyncError::GitUnavailable)?;

        let outcome = match self.state() {
            RepoState::Absent => self.fresh_clone()?,
            RepoState::Present => self.update()?,
        };
        info!(path = %self.path.display(), outcome = %outcome, "sync finished");
        Ok(outcome)
    }

    fn ensure_dirs(&self) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir(parent)?;
        }
        create_dir(&self.path)
    }

    fn fresh_clone(&self) -> Result<SyncOutcome, SyncError> {
        info!(url = %self.url, path = %self.path.display(), "cloning repository");

        fs::remove_dir_all(&self.path).map_err(|source| SyncError::DirectoryCreateFailed {
            path: self.path.clone(),
            source,
        })?;
        create_dir(&self.path)?;

        match M::clone(&self.url, &self.path) {
            Ok(()) => Ok(SyncOutcome::Cloned),
            Err(e) if e.is_benign() => {
                debug!(path = %self.path.display(), "repository already exists");
                Ok(SyncOutcome::AlreadyCloned)
            }
            Err(source) => {
                warn!(url = %self.url, error = %source, "clone failed");
                Err(SyncError::CloneFailed {
                    url: self.url.clone(),
                    source,
                })
            }
        }
    }

    fn update(&self) -> Result<SyncOutcome, SyncError> {
        debug!(path = %self.path.display(), "pulling repository");

        let worktree =
            GixBackend::open_worktree(&self.path).map_err(|source| SyncError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;

        match M::pull(&worktree) {
            Ok(()) => Ok(SyncOutcome::Updated),
            Err(e) if e.is_benign() => Ok(SyncOutcome::UpToDate),
            Err(source) => {
                warn!(path = %self.path.display(), error = %source, "pull failed");
                Err(SyncError::PullFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

fn create_dir(path: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(path).map_err(|source| SyncError::DirectoryCreateFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
