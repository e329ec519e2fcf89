// SPDX-License-Identifier: MIT
//! Domain error taxonomy.
//!
//! Every failure a request can hit maps to exactly one variant, and the
//! variant maps to exactly one HTTP status. Translation happens once, in
//! `IntoResponse` — handlers and the service never touch status codes for
//! failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The `User-Id` header was absent or empty.
    #[error("missing or empty User-Id header")]
    Unauthenticated,

    /// Malformed input: empty title, non-positive id, unknown status,
    /// non-integer user id, unparseable due date.
    #[error("{0}")]
    Validation(String),

    /// Absent row, or a row owned by a different caller — deliberately
    /// indistinguishable.
    #[error("task not found or not accessible")]
    NotFound,

    /// Unexpected persistence failure. The SQL detail is logged server-side
    /// and never sent to clients.
    #[error("internal storage error")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(e) = &self {
            error!(err = %e, "storage failure");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
