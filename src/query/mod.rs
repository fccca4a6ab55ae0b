// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structure and file-content queries against the working copy.
//!
//! ```text
//! fetch("lab1/main.go")        root + lab1/main.go   containment check
//! fetch("../../etc/passwd")    -> AccessDenied
//! fetch("/data/img/a.png")     static mode: anchored at static_root, verbatim
//! structure()                  -> tree::build_tree(root)
//! ```
//!
//! The containment check is lexical: `.` and `..` are resolved on the path
//! text and symbolic links are not followed, so a link inside the working
//! copy that points outside it is still served.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::QueryError;
use crate::tree::{FileNode, build_tree};

/// Resolves `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn absolute_normalized(path: &Path) -> Result<PathBuf, QueryError> {
    std::path::absolute(path)
        .map(|p| normalize_lexically(&p))
        .map_err(|_| QueryError::AccessDenied(path.display().to_string()))
}

/// Joins `requested` onto `root` and requires the result to stay inside it.
///
/// Leading separators in `requested` are ignored, so `/a` and `a` both name
/// `root/a`.
///
/// # Errors
///
/// Returns [`QueryError::AccessDenied`] if the joined path escapes `root`.
pub fn resolve_within(root: &Path, requested: &str) -> Result<PathBuf, QueryError> {
    let relative = requested.trim_start_matches(['/', '\\']);
    let root_abs = absolute_normalized(root)?;
    let joined_abs = absolute_normalized(&root.join(relative))?;

    if !joined_abs.starts_with(&root_abs) {
        warn!(requested, root = %root_abs.display(), "access denied");
        return Err(QueryError::AccessDenied(requested.to_string()));
    }
    Ok(joined_abs)
}

fn read_file(path: &Path, requested: &str) -> Result<Vec<u8>, QueryError> {
    std::fs::read(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "file not readable");
        QueryError::FileNotFound(requested.to_string())
    })
}

/// Answers queries for one working copy.
#[derive(Debug, Clone)]
pub struct QueryService {
    root: PathBuf,
    data_prefix: String,
    static_root: PathBuf,
}

impl QueryService {
    /// Service over `root`. Requests starting with `data_prefix` are served
    /// as static assets anchored at the filesystem root.
    pub fn new(root: impl Into<PathBuf>, data_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            data_prefix: data_prefix.into(),
            static_root: PathBuf::from("/"),
        }
    }

    /// Anchors static-asset requests at `static_root` instead of `/`.
    #[must_use]
    pub fn with_static_root(mut self, static_root: impl Into<PathBuf>) -> Self {
        self.static_root = static_root.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tree of the working copy.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Tree`] if the root is missing, unlistable or not a
    /// directory.
    pub fn structure(&self) -> Result<FileNode, QueryError> {
        Ok(build_tree(&self.root)?)
    }

    /// Raw bytes of the file named by the `path` parameter.
    ///
    /// # Errors
    ///
    /// - [`QueryError::MissingPath`] if the parameter is absent or empty
    /// - [`QueryError::AccessDenied`] if it escapes the working copy, or is a
    ///   static-asset path containing `..`
    /// - [`QueryError::FileNotFound`] if the target cannot be read
    pub fn fetch(&self, path: Option<&str>) -> Result<Vec<u8>, QueryError> {
        let requested = path.filter(|p| !p.is_empty()).ok_or(QueryError::MissingPath)?;

        if requested.starts_with(&self.data_prefix) {
            return self.fetch_static(requested);
        }

        let full = resolve_within(&self.root, requested)?;
        read_file(&full, requested)
    }

    fn fetch_static(&self, requested: &str) -> Result<Vec<u8>, QueryError> {
        let relative = Path::new(requested.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            warn!(requested, "access denied for static asset");
            return Err(QueryError::AccessDenied(requested.to_string()));
        }

        let full = self.static_root.join(relative);
        if !full.is_file() {
            debug!(path = %full.display(), "static file not found");
            return Err(QueryError::FileNotFound(requested.to_string()));
        }
        read_file(&full, requested)
    }
}

/// Static files under one directory, for the web UI and published data.
#[derive(Debug, Clone)]
pub struct StaticDir {
    dir: PathBuf,
    index: &'static str,
}

impl StaticDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index: "index.html",
        }
    }

    /// Resolves a request path to a readable file; directories map to their
    /// index file.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::AccessDenied`] for paths escaping the directory
    /// and [`QueryError::FileNotFound`] if nothing is there.
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf, QueryError> {
        let mut full = resolve_within(&self.dir, request_path)?;
        if full.is_dir() {
            full.push(self.index);
        }
        if full.is_file() {
            Ok(full)
        } else {
            Err(QueryError::FileNotFound(request_path.to_string()))
        }
    }

    /// Reads the file a request path resolves to.
    ///
    /// # Errors
    ///
    /// See [`StaticDir::resolve`].
    pub fn read(&self, request_path: &str) -> Result<(PathBuf, Vec<u8>), QueryError> {
        let full = self.resolve(request_path)?;
        let bytes = read_file(&full, request_path)?;
        Ok((full, bytes))
    }
}

#[cfg(test)]
mod tests;
