//! Prometheus metrics for the commentd server.
//!
//! - HTTP request metrics (count, latency)
//! - Cache metrics (hits, misses, write-path failures)
//! - Comment write counter

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

    pub const CACHE_HITS_TOTAL: &str = "cache_hits_total";
    pub const CACHE_MISSES_TOTAL: &str = "cache_misses_total";
    pub const CACHE_WRITE_FAILURES_TOTAL: &str = "cache_write_failures_total";

    pub const COMMENTS_WRITTEN_TOTAL: &str = "comments_written_total";
}

/// Initialize the Prometheus metrics exporter.
///
/// Called once at server startup. Returns `true` if initialization
/// succeeded, `false` if already initialized.
pub fn init_metrics() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        tracing::debug!("Prometheus metrics already initialized");
        return false;
    }

    // install_recorder() for pull-based metrics (we serve /metrics ourselves)
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROMETHEUS_HANDLE.set(handle).is_err() {
                tracing::warn!("Failed to store Prometheus handle (already set)");
                return false;
            }
            tracing::info!("Prometheus metrics initialized");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus recorder");
            false
        }
    }
}

/// Render all metrics in Prometheus text format.
///
/// Returns `None` if metrics were not initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, duration: Duration) {
    let status_class = match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };

    counter!(
        names::HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status_class,
    )
    .increment(1);

    histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "route" => route.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record a cache hit for a key family ("list" or "comment").
pub fn record_cache_hit(family: &'static str) {
    counter!(names::CACHE_HITS_TOTAL, "family" => family).increment(1);
}

/// Record a cache miss for a key family.
pub fn record_cache_miss(family: &'static str) {
    counter!(names::CACHE_MISSES_TOTAL, "family" => family).increment(1);
}

/// Record a non-fatal cache failure on the write path.
pub fn record_cache_write_failure() {
    counter!(names::CACHE_WRITE_FAILURES_TOTAL).increment(1);
}

/// Record a successfully written comment.
pub fn record_comment_written() {
    counter!(names::COMMENTS_WRITTEN_TOTAL).increment(1);
}
