// SPDX-License-Identifier: MIT
//! Observability utilities.
//!
//! Request logging middleware — the single place HTTP traffic is recorded.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{debug, info};

/// Log method, path, status, and latency for every request.
///
/// Slow requests (>1s) are promoted to info level regardless of outcome so
/// they stand out at the default filter.
pub async fn track_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!(method = %method, path = %path, "request started");
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed_ms = start.elapsed().as_millis();
    if elapsed_ms > 1000 {
        info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            elapsed_ms = elapsed_ms,
            "slow request"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            elapsed_ms = elapsed_ms,
            "request complete"
        );
    }
    response
}
