// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{QueryService, StaticDir, normalize_lexically, resolve_within};
use crate::error::{QueryError, TreeError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent");
    }
    fs::write(path, content).expect("failed to write file");
}

// --- Lexical normalization ---

#[test]
fn test_normalize_lexically() {
    let cases = [
        ("/a/b/../c", "/a/c"),
        ("/a/./b/", "/a/b"),
        ("/../../x", "/x"),
        ("/a/b/../../..", "/"),
        ("a/../b", "b"),
    ];
    for (input, expected) in cases {
        assert_eq!(
            normalize_lexically(Path::new(input)),
            PathBuf::from(expected),
            "{input}"
        );
    }
}

// --- Containment check ---

#[test]
fn test_resolve_within_accepts_nested_paths() {
    let temp = temp_dir();
    let root = temp.path();

    let resolved = resolve_within(root, "lab1/main.go").unwrap();
    assert!(resolved.ends_with("lab1/main.go"));
    assert!(resolved.starts_with(normalize_lexically(root)));

    // leading separator is relative to the root, not the filesystem
    let resolved = resolve_within(root, "/lab1/main.go").unwrap();
    assert!(resolved.starts_with(normalize_lexically(root)));

    // `..` that stays inside is fine
    assert!(resolve_within(root, "lab1/../README.md").is_ok());
}

#[test]
fn test_resolve_within_rejects_traversal() {
    let temp = temp_dir();
    let root = temp.path().join("wc");

    for requested in [
        "../secret.txt",
        "../../etc/passwd",
        "lab1/../../secret.txt",
        "/../wc-sibling/x",
        "a/b/../../../x",
    ] {
        let err = resolve_within(&root, requested).unwrap_err();
        assert!(
            matches!(&err, QueryError::AccessDenied(p) if p == requested),
            "{requested}: {err:?}"
        );
    }
}

#[test]
fn test_resolve_within_is_component_wise() {
    let temp = temp_dir();
    let root = temp.path().join("wc");
    // a sibling sharing the textual prefix is still outside
    let err = resolve_within(&root, "../wc2/file").unwrap_err();
    assert!(matches!(err, QueryError::AccessDenied(_)));
}

#[test]
fn test_resolve_within_relative_root() {
    assert!(resolve_within(Path::new("data/portfolio"), "a/b.md").is_ok());
    assert!(resolve_within(Path::new("data/portfolio"), "../x").is_err());
}

// --- QueryService ---

#[test]
fn test_fetch_reads_working_copy_file() {
    let temp = temp_dir();
    write(temp.path(), "lab1/main.go", "package main\n");
    let service = QueryService::new(temp.path(), "/data/");

    let bytes = service.fetch(Some("lab1/main.go")).unwrap();
    assert_eq!(bytes, b"package main\n");
    assert_eq!(service.fetch(Some("/lab1/main.go")).unwrap(), bytes);
}

#[test]
fn test_fetch_missing_path_parameter() {
    let temp = temp_dir();
    let service = QueryService::new(temp.path(), "/data/");

    assert!(matches!(service.fetch(None), Err(QueryError::MissingPath)));
    assert!(matches!(service.fetch(Some("")), Err(QueryError::MissingPath)));
}

#[test]
fn test_fetch_nonexistent_and_directory_are_not_found() {
    let temp = temp_dir();
    fs::create_dir_all(temp.path().join("dir")).unwrap();
    let service = QueryService::new(temp.path(), "/data/");

    let err = service.fetch(Some("nope.txt")).unwrap_err();
    assert!(matches!(err, QueryError::FileNotFound(_)), "{err:?}");
    let err = service.fetch(Some("dir")).unwrap_err();
    assert!(matches!(err, QueryError::FileNotFound(_)), "{err:?}");
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_fetch_traversal_is_denied() {
    let temp = temp_dir();
    write(temp.path(), "secret.txt", "top secret");
    let service = QueryService::new(temp.path().join("wc"), "/data/");

    let err = service.fetch(Some("../secret.txt")).unwrap_err();
    assert!(matches!(err, QueryError::AccessDenied(_)), "{err:?}");
    assert_eq!(err.status_code(), 403);
}

#[test]
fn test_fetch_static_asset_mode() {
    let temp = temp_dir();
    write(temp.path(), "data/published/notes.md", "# Notes");
    write(temp.path(), "wc/data/published/notes.md", "working copy");
    let service = QueryService::new(temp.path().join("wc"), "/data/").with_static_root(temp.path());

    // served from the static root, not joined onto the working copy
    let bytes = service.fetch(Some("/data/published/notes.md")).unwrap();
    assert_eq!(bytes, b"# Notes");

    let err = service.fetch(Some("/data/missing.md")).unwrap_err();
    assert!(matches!(err, QueryError::FileNotFound(_)), "{err:?}");

    let err = service.fetch(Some("/data/../wc/data/published/notes.md")).unwrap_err();
    assert!(matches!(err, QueryError::AccessDenied(_)), "{err:?}");

    let err = service.fetch(Some("/data/published")).unwrap_err();
    assert!(matches!(err, QueryError::FileNotFound(_)), "{err:?}");
}

#[test]
fn test_structure_of_working_copy() {
    let temp = temp_dir();
    let root = temp.path().join("portfolio");
    write(&root, "lab1/main.go", "x");
    let service = QueryService::new(&root, "/data/");

    let tree = service.structure().unwrap();
    assert_eq!(tree.name, "portfolio");
    assert_eq!(tree.descendant_count(), 2);
}

#[test]
fn test_structure_errors_map_to_server_error() {
    let temp = temp_dir();
    write(temp.path(), "file.txt", "x");

    let service = QueryService::new(temp.path().join("file.txt"), "/data/");
    let err = service.structure().unwrap_err();
    assert!(
        matches!(err, QueryError::Tree(TreeError::NotADirectory(_))),
        "{err:?}"
    );
    assert_eq!(err.status_code(), 500);

    let service = QueryService::new(temp.path().join("missing"), "/data/");
    let err = service.structure().unwrap_err();
    assert!(matches!(
        err,
        QueryError::Tree(TreeError::PathUnavailable { .. })
    ));
}

// --- StaticDir ---

#[test]
fn test_static_dir_serves_index_for_directories() {
    let temp = temp_dir();
    write(temp.path(), "index.html", "<html></html>");
    write(temp.path(), "js/app.js", "console.log(1)");
    let dir = StaticDir::new(temp.path());

    let (path, bytes) = dir.read("/").unwrap();
    assert!(path.ends_with("index.html"));
    assert_eq!(bytes, b"<html></html>");

    let (_, bytes) = dir.read("/js/app.js").unwrap();
    assert_eq!(bytes, b"console.log(1)");
}

#[test]
fn test_static_dir_errors() {
    let temp = temp_dir();
    let public = temp.path().join("public");
    fs::create_dir_all(public.join("empty")).unwrap();
    write(temp.path(), "private.txt", "x");
    let dir = StaticDir::new(&public);

    assert!(matches!(
        dir.resolve("/missing.css"),
        Err(QueryError::FileNotFound(_))
    ));
    assert!(matches!(
        dir.resolve("/empty"),
        Err(QueryError::FileNotFound(_))
    ));
    assert!(matches!(
        dir.resolve("/../private.txt"),
        Err(QueryError::AccessDenied(_))
    ));
}
