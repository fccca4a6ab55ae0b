// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP surface.
//!
//! ```text
//! GET /api/structure     JSON tree of the working copy      (CORS)
//! GET /api/file?path=P   raw bytes, text/plain              (CORS)
//! GET /api/status        repo + last sync                   (CORS)
//! GET /data/*path        files under server.data_dir        (CORS)
//! GET /*                 web UI under server.public_dir, / -> index.html
//! OPTIONS on CORS routes -> 200, empty
//! ```
//!
//! Filesystem work runs on the blocking pool. Handlers never touch the
//! scheduler, so a failing request cannot stall synchronization.

mod cors;
mod handlers;
mod mime;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::{StatusCode, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{QueryError, Result};
use crate::query::{QueryService, StaticDir};
use crate::scheduler::SyncStatus;

pub use mime::content_type_for;

/// Shared, read-only state of all handlers.
#[derive(Debug)]
pub struct AppState {
    query: QueryService,
    data: StaticDir,
    public: StaticDir,
    repo_url: String,
    status: Arc<SyncStatus>,
}

impl AppState {
    #[must_use]
    pub fn new(
        query: QueryService,
        data: StaticDir,
        public: StaticDir,
        repo_url: impl Into<String>,
        status: Arc<SyncStatus>,
    ) -> Self {
        Self {
            query,
            data,
            public,
            repo_url: repo_url.into(),
            status,
        }
    }

    /// State for the working copy and directories named in `config`.
    #[must_use]
    pub fn from_config(config: &Config, status: Arc<SyncStatus>) -> Self {
        Self::new(
            QueryService::new(&config.repo.path, &config.server.data_prefix),
            StaticDir::new(&config.server.data_dir),
            StaticDir::new(&config.server.public_dir),
            &config.repo.url,
            status,
        )
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_routes = Router::new()
        .route(
            "/api/structure",
            get(handlers::structure).options(cors::preflight),
        )
        .route("/api/file", get(handlers::file).options(cors::preflight))
        .route("/api/status", get(handlers::status).options(cors::preflight))
        .route(
            "/data/*path",
            get(handlers::data_asset).options(cors::preflight),
        )
        .layer(middleware::from_fn(cors::cors));

    Router::new()
        .merge(cors_routes)
        .fallback(handlers::public_asset)
        .with_state(state)
}

/// Serves `state` on `listener` until `token` is cancelled.
///
/// # Errors
///
/// Returns an error if the listener address cannot be read or serving fails.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    token: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr().context("listener has no address")?;
    info!(%addr, "server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(token.cancelled_owned())
        .await
        .context("HTTP server failed")?;

    info!("server stopped");
    Ok(())
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
