// portfolio-rs: Repository Portfolio Viewer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Permissive CORS for the API and data routes.

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

pub(super) const ALLOW_ORIGIN: &str = "*";
pub(super) const ALLOW_METHODS: &str = "GET, OPTIONS";
pub(super) const ALLOW_HEADERS: &str = "Content-Type";

/// Adds the CORS headers to every response.
pub(super) async fn cors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

/// `OPTIONS` answers 200 with an empty body.
pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}
