// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{LogConfig, LogLevel, open_log_file};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(42), None);
    assert!(LogLevel::TRACE > LogLevel::DEBUG);
}

#[test]
fn test_directives() {
    insta::assert_snapshot!(LogLevel::SILENT.directives(), @"off");
    insta::assert_snapshot!(LogLevel::WARN.directives(), @"warn");
    insta::assert_snapshot!(
        LogLevel::INFO.directives(),
        @"warn,portfolio=info,portfolio_rs=info"
    );
    insta::assert_snapshot!(
        LogLevel::TRACE.directives(),
        @"warn,portfolio=trace,portfolio_rs=trace"
    );
    insta::assert_snapshot!(LogLevel::EVERYTHING.directives(), @"trace");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_log_file("logs/portfolio.log")
        .with_json_file(true)
        .build();
    assert_eq!(config.log_file(), Some(Path::new("logs/portfolio.log")));
    assert!(config.json_file());
}

#[test]
fn test_open_log_file_creates_parents_and_appends() {
    use std::io::Write;

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nested/dir/portfolio.log");

    writeln!(open_log_file(&path).unwrap(), "first").unwrap();
    writeln!(open_log_file(&path).unwrap(), "second").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}
