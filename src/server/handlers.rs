// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::AppState;
use super::mime::content_type_for;
use crate::error::QueryError;
use crate::git::METADATA_MARKER;
use crate::git::backend::{GitQuery, GixBackend};
use crate::query::StaticDir;
use crate::scheduler::LastSync;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Runs filesystem work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, QueryError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(IntoResponse::into_response),
        Err(e) => {
            error!(error = %e, "request task panicked");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response())
        }
    }
}

pub(super) async fn structure(State(state): State<Arc<AppState>>) -> Response {
    let query = state.query.clone();
    match blocking(move || query.structure()).await {
        Ok(tree) => Json(tree).into_response(),
        Err(response) => response,
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct FileParams {
    path: Option<String>,
}

pub(super) async fn file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FileParams>,
) -> Response {
    let query = state.query.clone();
    match blocking(move || query.fetch(params.path.as_deref())).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, TEXT_PLAIN)], bytes).into_response(),
        Err(response) => response,
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    repo_url: String,
    path: PathBuf,
    present: bool,
    head: Option<String>,
    branch: Option<String>,
    cycles: u64,
    failures: u64,
    last_sync: Option<LastSync>,
}

pub(super) async fn status(State(state): State<Arc<AppState>>) -> Response {
    let root = state.query.root().to_path_buf();
    let wc = root.clone();
    let (present, head, branch) = tokio::task::spawn_blocking(move || {
        if !wc.join(METADATA_MARKER).exists() {
            return (false, None, None);
        }
        let head = GixBackend::head_commit(&wc).ok();
        let branch = GixBackend::current_branch(&wc).ok().flatten();
        (true, head, branch)
    })
    .await
    .unwrap_or((false, None, None));

    let report = state.status.snapshot();
    Json(StatusBody {
        repo_url: state.repo_url.clone(),
        path: root,
        present,
        head,
        branch,
        cycles: report.cycles,
        failures: report.failures,
        last_sync: report.last_sync,
    })
    .into_response()
}

async fn static_file(dir: StaticDir, request_path: String) -> Response {
    match blocking(move || dir.read(&request_path)).await {
        Ok((path, bytes)) => {
            ([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response()
        }
        Err(response) => response,
    }
}

pub(super) async fn data_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    static_file(state.data.clone(), path).await
}

pub(super) async fn public_asset(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    static_file(state.public.clone(), uri.path().to_string()).await
}
