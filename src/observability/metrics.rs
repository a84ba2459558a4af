//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, route, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `api_rate_limited_total` (counter): 429s by policy
//! - `api_gate_rejections_total` (counter): gate failures by kind
//! - `api_cache_hits_total` / `api_cache_misses_total` (counters)
//!
//! # Design Decisions
//! - Low-overhead updates (atomic operations)
//! - Exposition via a Prometheus scrape endpoint on its own port

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one served request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "api_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a rate-limit rejection under the named policy.
pub fn record_rate_limited(policy: &'static str) {
    counter!("api_rate_limited_total", "policy" => policy).increment(1);
}

/// Record an authorization gate rejection.
pub fn record_gate_rejection(kind: &'static str) {
    counter!("api_gate_rejections_total", "kind" => kind).increment(1);
}

pub fn record_cache_hit() {
    counter!("api_cache_hits_total").increment(1);
}

pub fn record_cache_miss() {
    counter!("api_cache_misses_total").increment(1);
}
