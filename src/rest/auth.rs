//! Caller identity extraction.
//!
//! The `User-Id` header is trusted as-is — an opaque, unverified identity.
//! That is the whole auth model: absence halts the request with 401 before
//! any handler runs; presence is taken at face value.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "User-Id";

/// The raw header value, unparsed. The service decides whether it is a
/// usable integer.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

pub async fn require_user(mut req: Request, next: Next) -> Response {
    let value = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if value.is_empty() {
        return ApiError::Unauthenticated.into_response();
    }

    req.extensions_mut().insert(UserId(value));
    next.run(req).await
}
