// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! .env --> cli::parse() --> Logging --> Config --> Command Dispatch
//!   Serve (default) | Sync | Tree | Options | Version
//! ```

use std::process::ExitCode;

use portfolio_rs::cli::global::GlobalOptions;
use portfolio_rs::cli::{self, Command, ServeArgs};
use portfolio_rs::cmd::config::run_options_command;
use portfolio_rs::cmd::serve::run_serve_command;
use portfolio_rs::cmd::sync::run_sync_command;
use portfolio_rs::cmd::tree::run_tree_command;
use portfolio_rs::config::Config;
use portfolio_rs::config::loader::{ConfigLoader, DotenvStatus, load_dotenv};
use portfolio_rs::logging::init_logging;
use portfolio_rs::logging::{LogConfig, LogLevel};
use tracing::{debug, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    // before parsing, so that clap's env fallbacks see .env values
    let dotenv = load_dotenv();
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    match dotenv {
        DotenvStatus::Loaded(path) => debug!(path = %path.display(), "loaded .env file"),
        DotenvStatus::NotFound => debug!(".env file not found"),
        DotenvStatus::Failed(e) => warn!(error = %e, ".env file could not be loaded"),
    }

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .with_json_file(global.log_json)
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => build_config_loader(&cli.global).and_then(|loader| {
            let files = loader.describe_sources();
            load_config(loader).map(|config| run_options_command(&config, &files))
        }),
        Some(Command::Sync(args)) => match load_global_config(&cli.global) {
            Ok(config) => run_sync_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Tree(args)) => {
            load_global_config(&cli.global).and_then(|config| run_tree_command(args, &config))
        }
        Some(Command::Serve(args)) => serve(&cli.global, args).await,
        None => serve(&cli.global, &ServeArgs::default()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(global: &GlobalOptions, args: &ServeArgs) -> portfolio_rs::error::Result<()> {
    let config = load_global_config(global)?;
    run_serve_command(args, &config).await
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> portfolio_rs::error::Result<ConfigLoader> {
    global.config_loader(|name| std::env::var(name).ok())
}

fn load_config(loader: ConfigLoader) -> portfolio_rs::error::Result<Config> {
    for line in loader.describe_sources() {
        debug!(source = %line, "config source");
    }
    loader.build()
}

fn load_global_config(global: &GlobalOptions) -> portfolio_rs::error::Result<Config> {
    build_config_loader(global).and_then(load_config)
}
