// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `tree`: print the JSON structure of a directory.

use anyhow::Context;

use crate::cli::TreeArgs;
use crate::config::Config;
use crate::error::{PortfolioError, Result};
use crate::tree::{TreeOptions, build_tree_with};

/// Render the tree for `args` as JSON.
///
/// # Errors
///
/// Returns an error if the directory cannot be materialized.
pub fn render_tree(args: &TreeArgs, config: &Config) -> Result<String> {
    let root = args.dir.as_ref().unwrap_or(&config.repo.path);
    let options = TreeOptions::builder()
        .maybe_with_max_depth(args.max_depth)
        .build();

    let tree = build_tree_with(root, &options)
        .map_err(PortfolioError::from)
        .with_context(|| format!("failed to build tree of {}", root.display()))?;

    let json = if args.compact {
        serde_json::to_string(&tree)?
    } else {
        serde_json::to_string_pretty(&tree)?
    };
    Ok(json)
}

/// Print the tree for `args`.
///
/// # Errors
///
/// See [`render_tree`].
pub fn run_tree_command(args: &TreeArgs, config: &Config) -> Result<()> {
    println!("{}", render_tree(args, config)?);
    Ok(())
}
