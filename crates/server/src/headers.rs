//! Optional request header validation.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use service::ServiceError;
use tracing::warn;

use crate::errors::JsonApiError;

pub const CORRELATION_ID: &str = "X-Correlation-ID";

const EXEMPT_PREFIXES: [&str; 2] = ["/health", "/api-docs"];

fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Rejects requests without a non-blank `X-Correlation-ID` header.
pub async fn require_correlation_id(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS || is_exempt(req.uri().path()) {
        return next.run(req).await;
    }
    let present = req
        .headers()
        .get(CORRELATION_ID)
        .and_then(|v| v.to_str().ok())
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    if !present {
        warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "request rejected: missing correlation id"
        );
        return JsonApiError::from(ServiceError::missing(CORRELATION_ID)).into_response();
    }
    next.run(req).await
}
