// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          RepoSynchronizer (sync/)
//!          Absent -> clone | Present -> pull
//!                      |
//!                      v
//!      ,-------------------------------,
//!      |       backend (traits)        |
//!      '-----+-------------------+-----'
//!            |                   |
//!            v                   v
//!        GitQuery           GitMutation
//!       (gix, read)         (CLI, write)
//!            |                   |
//!            v                   v
//!        GixBackend         ShellBackend
//!        .open_worktree     .clone
//!        .head_commit       .pull --ff-only
//!        .current_branch
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for network transports and checkout.

pub mod backend;
pub mod sync;

/// Name of the metadata directory whose presence marks an initialized working copy.
pub const METADATA_MARKER: &str = ".git";

#[cfg(test)]
mod test_utils;
