// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for git tests.
//!
//! Builds local "remote" repositories with the git CLI so that clone and
//! pull run against file paths instead of the network.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run a git command with a fixed identity, panicking on failure.
pub(crate) fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .env("LC_ALL", "C")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Write `content` to `rel` inside `repo` and commit it.
pub(crate) fn commit_file(repo: &Path, rel: &str, content: &str) {
    let path = repo.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent");
    }
    fs::write(&path, content).expect("failed to write file");
    run_git(&["add", "--all"], repo);
    run_git(&["commit", "--quiet", "-m", &format!("update {rel}")], repo);
}

/// Create an upstream repository under `base` with one committed README.
pub(crate) fn init_upstream(base: &Path) -> PathBuf {
    let upstream = base.join("upstream");
    fs::create_dir_all(&upstream).expect("failed to create upstream");
    run_git(&["init", "--quiet"], &upstream);
    commit_file(&upstream, "README.md", "# Portfolio\n");
    upstream
}

/// URL form of a local upstream path accepted by `git clone`.
pub(crate) fn url_of(upstream: &Path) -> String {
    upstream.display().to_string()
}
