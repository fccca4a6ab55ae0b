// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory-to-tree materialization.
//!
//! ```text
//! working copy/              FileNode "/"
//!   .git/        (hidden)      |
//!   README.md                  +-- README.md   /README.md
//!   lab1/                      +-- lab1        /lab1
//!     main.go                        +-- main.go  /lab1/main.go
//! ```
//!
//! Walks depth-first in pre-order with `ignore::Walk` (all ignore files
//! disabled, hidden entries skipped with their subtrees) and folds the
//! flat entry stream back into nested nodes using a depth stack.
//!
//! Only a root that is missing, not a directory or unlistable is an error.
//! Unreadable entries and subdirectories are logged and skipped; an
//! unlistable subdirectory still appears, with no children.

use bon::Builder;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::TreeError;

/// Kind of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "dir")]
    Directory,
    #[serde(rename = "file")]
    File,
}

/// One file or directory in the served structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Base name of the entry.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Forward-slash path relative to the tree root, which is `/`.
    pub path: String,
    /// Present (possibly empty) for directories, absent for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    /// Byte length of a file. Omitted when zero.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u64,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(size: &u64) -> bool {
    *size == 0
}

impl FileNode {
    fn directory(name: String, path: String) -> Self {
        Self {
            name,
            kind: NodeKind::Directory,
            path,
            children: Some(Vec::new()),
            size: 0,
        }
    }

    fn file(name: String, path: String, size: u64) -> Self {
        Self {
            name,
            kind: NodeKind::File,
            path,
            children: None,
            size,
        }
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Children of a directory, empty for files.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Number of nodes below this one (the node itself excluded).
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children()
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    fn push_child(&mut self, child: Self) {
        if let Some(children) = self.children.as_mut() {
            children.push(child);
        }
    }
}

/// Joins a logical tree path with a child name.
fn join_logical(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Options for tree materialization.
#[derive(Debug, Clone, Builder)]
pub struct TreeOptions {
    /// Sort siblings by file name instead of filesystem enumeration order.
    #[builder(setters(name = with_sorted), default = true)]
    sorted: bool,
    /// Maximum depth below the root (None = unlimited).
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TreeOptions {
    #[must_use]
    pub const fn sorted(&self) -> bool {
        self.sorted
    }

    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

/// Builds the tree of `root` with default options.
///
/// # Errors
///
/// Returns [`TreeError::PathUnavailable`] if the root cannot be read or
/// listed, and [`TreeError::NotADirectory`] if it is not a directory.
pub fn build_tree(root: &Path) -> Result<FileNode, TreeError> {
    build_tree_with(root, &TreeOptions::default())
}

/// Builds the tree of `root`.
///
/// # Errors
///
/// Returns [`TreeError::PathUnavailable`] if the root cannot be read or
/// listed, and [`TreeError::NotADirectory`] if it is not a directory.
pub fn build_tree_with(root: &Path, options: &TreeOptions) -> Result<FileNode, TreeError> {
    let meta = std::fs::metadata(root).map_err(|e| TreeError::unavailable(root, e))?;
    if !meta.is_dir() {
        return Err(TreeError::NotADirectory(root.to_path_buf()));
    }
    // the walker only reports root listing failures as ordinary entry errors
    std::fs::read_dir(root).map_err(|e| TreeError::unavailable(root, e))?;

    let mut stack = vec![FileNode::directory(root_name(root), "/".to_string())];
    let mut skipped = 0usize;

    for result in walker(root, options).build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                skipped += 1;
                continue;
            }
        };

        let depth = entry.depth();
        if depth == 0 {
            continue;
        }

        // close finished directories until the top of the stack is this entry's parent
        while stack.len() > depth {
            fold_top(&mut stack);
        }
        // inside a directory that was itself skipped
        if stack.len() < depth {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "skipping entry without metadata");
                skipped += 1;
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(path) = stack.last().map(|parent| join_logical(&parent.path, &name)) else {
            continue;
        };

        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            stack.push(FileNode::directory(name, path));
        } else if let Some(parent) = stack.last_mut() {
            parent.push_child(FileNode::file(name, path, meta.len()));
        }
    }

    while stack.len() > 1 {
        fold_top(&mut stack);
    }
    let tree = stack
        .pop()
        .ok_or_else(|| TreeError::NotADirectory(root.to_path_buf()))?;

    debug!(
        root = %root.display(),
        nodes = tree.descendant_count(),
        skipped,
        "built tree"
    );
    Ok(tree)
}

fn walker(root: &Path, options: &TreeOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .max_depth(options.max_depth());
    if options.sorted() {
        builder.sort_by_file_name(|a, b| a.cmp(b));
    }
    builder
}

fn fold_top(stack: &mut Vec<FileNode>) {
    if let Some(done) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.push_child(done);
    }
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| root.display().to_string())
}
