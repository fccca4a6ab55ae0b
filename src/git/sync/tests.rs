// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{RepoState, RepoSynchronizer, SyncOutcome};
use crate::error::{GitError, ProcessError, SyncError};
use crate::git::backend::{GitMutation, GitResult};
use crate::git::test_utils::{commit_file, init_upstream, url_of};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// --- Fake backends ---

/// Clone initializes an empty repository; pull always reports no changes.
struct QuietRemote;

impl GitMutation for QuietRemote {
    fn clone(_url: &str, dest: &Path) -> GitResult<()> {
        gix::init(dest).expect("failed to init repo");
        Ok(())
    }

    fn pull(_repo_path: &Path) -> GitResult<()> {
        Err(GitError::AlreadyUpToDate)
    }
}

/// Clone leaves a repository behind but reports that it already existed.
struct RacingClone;

impl GitMutation for RacingClone {
    fn clone(_url: &str, dest: &Path) -> GitResult<()> {
        gix::init(dest).expect("failed to init repo");
        Err(GitError::RepositoryExists {
            path: dest.display().to_string(),
        })
    }

    fn pull(_repo_path: &Path) -> GitResult<()> {
        Ok(())
    }
}

/// Every operation fails with a command error.
struct BrokenRemote;

impl GitMutation for BrokenRemote {
    fn clone(_url: &str, _dest: &Path) -> GitResult<()> {
        Err(GitError::CommandFailed {
            command: "git clone".to_string(),
            message: "fatal: repository not found".to_string(),
        })
    }

    fn pull(_repo_path: &Path) -> GitResult<()> {
        Err(GitError::CommandFailed {
            command: "git pull".to_string(),
            message: "fatal: Not possible to fast-forward, aborting.".to_string(),
        })
    }
}

/// Git is not installed.
struct NoGit;

impl GitMutation for NoGit {
    fn ensure_available() -> GitResult<()> {
        Err(GitError::Process(ProcessError::ExecutableNotFound {
            name: "git".to_string(),
        }))
    }

    fn clone(_url: &str, _dest: &Path) -> GitResult<()> {
        unreachable!("clone must not run without git")
    }

    fn pull(_repo_path: &Path) -> GitResult<()> {
        unreachable!("pull must not run without git")
    }
}

// --- Outcome classification ---

#[test]
fn test_outcome_display() {
    assert_eq!(SyncOutcome::Cloned.to_string(), "cloned");
    assert_eq!(SyncOutcome::UpToDate.to_string(), "up-to-date");
    assert_eq!(SyncOutcome::AlreadyCloned.as_str(), "already-cloned");
    assert_eq!(SyncOutcome::Updated.as_str(), "updated");
}

#[test]
fn test_state_follows_marker() {
    let temp = temp_dir();
    let sync = RepoSynchronizer::<QuietRemote>::with_backend(temp.path().join("wc"), "u");
    assert_eq!(sync.state(), RepoState::Absent);

    fs::create_dir_all(temp.path().join("wc/.git")).unwrap();
    assert_eq!(sync.state(), RepoState::Present);
}

#[test]
fn test_clone_then_up_to_date_with_fake_backend() {
    let temp = temp_dir();
    let path = temp.path().join("nested/wc");
    let sync = RepoSynchronizer::<QuietRemote>::with_backend(&path, "https://example.invalid/r");

    assert_eq!(sync.sync().unwrap(), SyncOutcome::Cloned);
    assert_eq!(sync.state(), RepoState::Present);
    assert_eq!(sync.sync().unwrap(), SyncOutcome::UpToDate);
}

#[test]
fn test_existing_repository_on_clone_is_success() {
    let temp = temp_dir();
    let sync = RepoSynchronizer::<RacingClone>::with_backend(temp.path().join("wc"), "u");

    assert_eq!(sync.sync().unwrap(), SyncOutcome::AlreadyCloned);
    assert_eq!(sync.state(), RepoState::Present);
}

#[test]
fn test_clone_failure_is_reported() {
    let temp = temp_dir();
    let sync = RepoSynchronizer::<BrokenRemote>::with_backend(temp.path().join("wc"), "bad-url");

    let err = sync.sync().unwrap_err();
    assert!(
        matches!(&err, SyncError::CloneFailed { url, .. } if url == "bad-url"),
        "{err:?}"
    );
    // the working copy directory is left behind, empty
    assert!(temp.path().join("wc").is_dir());
    assert_eq!(sync.state(), RepoState::Absent);
}

#[test]
fn test_pull_failure_is_reported() {
    let temp = temp_dir();
    let path = temp.path().join("wc");
    gix::init(&path).unwrap();
    let sync = RepoSynchronizer::<BrokenRemote>::with_backend(&path, "u");

    let err = sync.sync().unwrap_err();
    assert!(matches!(err, SyncError::PullFailed { .. }), "{err:?}");
}

#[test]
fn test_corrupt_marker_fails_to_open() {
    let temp = temp_dir();
    let path = temp.path().join("wc");
    fs::create_dir_all(path.join(".git")).unwrap();
    let sync = RepoSynchronizer::<QuietRemote>::with_backend(&path, "u");

    let err = sync.sync().unwrap_err();
    assert!(matches!(err, SyncError::OpenFailed { .. }), "{err:?}");
}

#[test]
fn test_missing_git_touches_nothing() {
    let temp = temp_dir();
    let path = temp.path().join("wc");
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("keep.txt"), "x").unwrap();
    let sync = RepoSynchronizer::<NoGit>::with_backend(&path, "u");

    let err = sync.sync().unwrap_err();
    assert!(matches!(err, SyncError::GitUnavailable(_)), "{err:?}");
    assert!(path.join("keep.txt").exists());
}

#[test]
fn test_directory_creation_failure() {
    let temp = temp_dir();
    let blocker = temp.path().join("file");
    fs::write(&blocker, "not a dir").unwrap();
    let sync = RepoSynchronizer::<QuietRemote>::with_backend(blocker.join("wc"), "u");

    let err = sync.sync().unwrap_err();
    assert!(
        matches!(err, SyncError::DirectoryCreateFailed { .. }),
        "{err:?}"
    );
}

// --- Real git against a local upstream ---

#[test]
fn test_sync_clones_into_missing_path() {
    let temp = temp_dir();
    let upstream = init_upstream(temp.path());
    let path = temp.path().join("data/portfolio");
    let sync = RepoSynchronizer::new(&path, url_of(&upstream));

    assert_eq!(sync.sync().unwrap(), SyncOutcome::Cloned);
    assert!(path.join(".git").is_dir());
    assert!(path.join("README.md").is_file());
}

#[test]
fn test_sync_twice_is_idempotent() {
    let temp = temp_dir();
    let upstream = init_upstream(temp.path());
    let sync = RepoSynchronizer::new(temp.path().join("wc"), url_of(&upstream));

    assert_eq!(sync.sync().unwrap(), SyncOutcome::Cloned);
    assert_eq!(sync.sync().unwrap(), SyncOutcome::UpToDate);
    assert_eq!(sync.sync().unwrap(), SyncOutcome::UpToDate);
}

#[test]
fn test_sync_pulls_new_commits() {
    let temp = temp_dir();
    let upstream = init_upstream(temp.path());
    let path = temp.path().join("wc");
    let sync = RepoSynchronizer::new(&path, url_of(&upstream));
    sync.sync().unwrap();

    commit_file(&upstream, "lab2/report.md", "# Lab 2\n");
    assert_eq!(sync.sync().unwrap(), SyncOutcome::Updated);
    assert_eq!(
        fs::read_to_string(path.join("lab2/report.md")).unwrap(),
        "# Lab 2\n"
    );
}

#[test]
fn test_missing_marker_triggers_fresh_clone() {
    let temp = temp_dir();
    let upstream = init_upstream(temp.path());
    let path = temp.path().join("wc");
    let sync = RepoSynchronizer::new(&path, url_of(&upstream));
    sync.sync().unwrap();

    fs::remove_dir_all(path.join(".git")).unwrap();
    fs::write(path.join("stray.tmp"), "partial").unwrap();
    assert_eq!(sync.state(), RepoState::Absent);

    assert_eq!(sync.sync().unwrap(), SyncOutcome::Cloned);
    assert!(!path.join("stray.tmp").exists());
    assert!(path.join("README.md").is_file());
    assert_eq!(sync.state(), RepoState::Present);
}
