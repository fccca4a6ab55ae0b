// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            serve / sync / tree
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, env, legacy env    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             scheduler    server    query
//!             interval     axum      path safety
//!                 |           |        |
//!                 v           +---+----+
//!               git               v
//!          sync, gix/CLI        tree
//!                            ignore walk
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod query;
pub mod scheduler;
pub mod server;
pub mod tree;
