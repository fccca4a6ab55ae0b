// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML files and layered sources.

use std::fs;
use std::path::PathBuf;

use portfolio_rs::config::Config;
use portfolio_rs::config::loader::ConfigLoader;

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("portfolio.toml");
    fs::write(
        &path,
        r#"
[repo]
path = "/var/lib/portfolio"
url = "https://example.com/course.git"
sync_interval_minutes = 30

[server]
addr = "127.0.0.1:8081"
public_dir = "/usr/share/portfolio/web"
data_dir = "/var/lib/portfolio-data"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.repo.path, PathBuf::from("/var/lib/portfolio"));
    assert_eq!(config.repo.url, "https://example.com/course.git");
    assert_eq!(config.repo.sync_interval_minutes, 30);
    assert_eq!(config.server.addr, "127.0.0.1:8081");
    assert_eq!(
        config.server.public_dir,
        PathBuf::from("/usr/share/portfolio/web")
    );
    assert_eq!(
        config.server.data_dir,
        PathBuf::from("/var/lib/portfolio-data")
    );
    // untouched keys keep their defaults
    assert_eq!(config.server.data_prefix, "/data/");
}

#[test]
fn config_missing_required_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let err = Config::from_file(temp.path().join("absent.toml")).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("config error: failed to load config from"), "{message}");
    assert!(message.contains("absent.toml"), "{message}");
}

#[test]
fn config_later_files_win() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("base.toml");
    let local = temp.path().join("local.toml");
    fs::write(&base, "[repo]\nurl = 'https://base'\nsync_interval_minutes = 10\n").unwrap();
    fs::write(&local, "[repo]\nurl = 'https://local'\n").unwrap();

    let loader = ConfigLoader::new().add_toml_file(&base).add_toml_file(&local);
    assert_eq!(loader.sources().len(), 2);
    let config = loader.build().unwrap();

    assert_eq!(config.repo.url, "https://local");
    assert_eq!(config.repo.sync_interval_minutes, 10);
}

#[test]
fn config_invalid_toml_fails() {
    assert!(Config::parse("[repo\nurl = ").is_err());
    assert!(Config::parse("[repo]\nsync_interval_minutes = 'often'\n").is_err());
}

// =============================================================================
// Legacy environment
// =============================================================================

#[test]
fn config_legacy_env_full_set() {
    let env = |name: &str| match name {
        "PORTFOLIO_PATH" => Some("./mirror".to_string()),
        "REPO_URL" => Some("git@example.com:me/course.git".to_string()),
        "SYNC_INTERVAL_MINUTES" => Some(" 5 ".to_string()),
        _ => None,
    };
    let config = ConfigLoader::new()
        .with_legacy_env(env)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.repo.path, PathBuf::from("./mirror"));
    assert_eq!(config.repo.url, "git@example.com:me/course.git");
    assert_eq!(config.repo.sync_interval_minutes, 5);
}

#[test]
fn config_legacy_zero_interval_is_rejected() {
    let env = |name: &str| (name == "SYNC_INTERVAL_MINUTES").then(|| "0".to_string());
    let err = ConfigLoader::new()
        .with_legacy_env(env)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("at least 1"), "{err}");
}
