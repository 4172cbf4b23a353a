//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_lookups_total` (counter): lookups by method and outcome (hit/miss)
//! - `router_lookup_duration_seconds` (histogram): time spent resolving a path
//! - `router_routes` (gauge): routes in the active table
//! - `router_reloads_total` (counter): hot reloads by outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter is only installed when enabled in config
//! - Extension methods share the `OTHER` label so clients cannot mint series

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Installs the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Label for `method`: the standard methods by name, anything else `OTHER`.
pub fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "PATCH" => "PATCH",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "CONNECT" => "CONNECT",
        "TRACE" => "TRACE",
        _ => "OTHER",
    }
}

/// Records one route lookup.
pub fn record_lookup(method: &Method, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "router_lookups_total",
        "method" => method_label(method),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("router_lookup_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Records the size of the active route table.
pub fn record_routes(count: usize) {
    metrics::gauge!("router_routes").set(count as f64);
}

/// Records a hot reload attempt.
pub fn record_reload(outcome: &'static str) {
    metrics::counter!("router_reloads_total", "outcome" => outcome).increment(1);
}
