//! Request middleware: request ids and per-request metrics.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attaches a request id to every request and echoes it on the response.
///
/// An id supplied by the caller is kept; otherwise a fresh one is generated.
/// The id is stored in request extensions so the trace span can pick it up.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let value =
        HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("invalid"));
    req.extensions_mut().insert(value.clone());

    let mut res = next.run(req).await;
    res.headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    res
}

/// Records request count and latency, labeled by route template rather than
/// the raw path to keep metric cardinality bounded.
pub async fn track_metrics(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let res = next.run(req).await;

    crate::metrics::record_http_request(&method, &route, res.status().as_u16(), start.elapsed());
    res
}
