// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend   (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, ProcessError};
use std::path::{Path, PathBuf};

/// Backend result type.
pub type GitResult<T> = std::result::Result<T, GitError>;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Open the repository at `path` and require a checked-out worktree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or is bare.
    fn open_worktree(path: &Path) -> GitResult<PathBuf>;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository opening or head resolution fails.
    fn current_branch(path: &Path) -> GitResult<Option<String>>;

    /// Get the commit id HEAD points to, as hex.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD is unborn.
    fn head_commit(path: &Path) -> GitResult<String>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// The two idempotent outcomes are reported as errors so callers decide
/// whether they count as success: [`GitError::RepositoryExists`] from
/// `clone` and [`GitError::AlreadyUpToDate`] from `pull`.
pub trait GitMutation {
    /// Check that the backend can run at all.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the backend is unusable (e.g. git not installed).
    fn ensure_available() -> GitResult<()> {
        Ok(())
    }

    /// Clone `url` into the existing, empty directory `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RepositoryExists`] if `dest` already holds a
    /// repository, or another `GitError` if the clone fails.
    fn clone(url: &str, dest: &Path) -> GitResult<()>;

    /// Fast-forward the checked-out branch from its upstream.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::AlreadyUpToDate`] if there was nothing to pull, or
    /// another `GitError` if the pull fails.
    fn pull(repo_path: &Path) -> GitResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GixBackend {
    fn open(path: &Path) -> GitResult<gix::Repository> {
        gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))
    }
}

impl GitQuery for GixBackend {
    fn open_worktree(path: &Path) -> GitResult<PathBuf> {
        let repo = Self::open(path)?;
        repo.workdir()
            .map(Path::to_path_buf)
            .ok_or(GitError::Gix(GixError::BareRepository))
    }

    fn current_branch(path: &Path) -> GitResult<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn head_commit(path: &Path) -> GitResult<String> {
        let repo = Self::open(path)?;
        let id = repo
            .head_id()
            .map_err(|e| GitError::Gix(GixError::HeadId(Box::new(e))))?;
        Ok(id.detach().to_string())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Clone and pull need transports and checkout, which the enabled gix
/// features do not cover.
pub struct ShellBackend;

impl ShellBackend {
    /// Locate the git executable on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::ExecutableNotFound`] if git is not installed.
    pub fn locate() -> GitResult<PathBuf> {
        which::which("git").map_err(|_| {
            GitError::Process(ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            })
        })
    }

    /// Execute a git command and return its trimmed stdout.
    ///
    /// Always sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so that
    /// a remote asking for credentials fails instead of hanging, and `LC_ALL=C`
    /// so that outcome messages can be matched.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> GitResult<String> {
        use std::process::Command;

        let git = Self::locate()?;
        let output = Command::new(&git)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .output()
            .map_err(|source| {
                GitError::Process(ProcessError::SpawnFailed {
                    command: format!("git {}", args.join(" ")),
                    source,
                })
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Whether `git clone` refused because the destination is already a repository.
fn is_existing_destination(err: &GitError, dest: &Path) -> bool {
    matches!(err, GitError::CommandFailed { message, .. } if message.contains("already exists"))
        && dest.join(super::METADATA_MARKER).exists()
}

/// Whether `git pull` output reports that nothing changed.
pub(crate) fn is_up_to_date_output(stdout: &str) -> bool {
    let lower = stdout.to_ascii_lowercase();
    lower.contains("already up to date") || lower.contains("already up-to-date")
}

impl GitMutation for ShellBackend {
    fn ensure_available() -> GitResult<()> {
        Self::locate().map(|_| ())
    }

    fn clone(url: &str, dest: &Path) -> GitResult<()> {
        // git runs from the parent, so a relative destination would resolve twice
        let dest = std::path::absolute(dest).map_err(|e| GitError::CommandFailed {
            command: "git clone".to_string(),
            message: format!("cannot resolve destination {}: {e}", dest.display()),
        })?;
        let dest_str = dest.to_str().ok_or_else(|| GitError::CommandFailed {
            command: "git clone".to_string(),
            message: format!("invalid destination path {}", dest.display()),
        })?;
        let parent = dest.parent().unwrap_or_else(|| Path::new("/"));

        match Self::git_command(&["clone", "--quiet", "--", url, dest_str], parent) {
            Ok(_) => Ok(()),
            Err(e) if is_existing_destination(&e, &dest) => Err(GitError::RepositoryExists {
                path: dest.display().to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    fn pull(repo_path: &Path) -> GitResult<()> {
        let stdout = Self::git_command(&["pull", "--ff-only", "--no-rebase"], repo_path)?;
        if is_up_to_date_output(&stdout) {
            return Err(GitError::AlreadyUpToDate);
        }
        Ok(())
    }
}
