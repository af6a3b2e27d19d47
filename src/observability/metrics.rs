//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fact_proxy_requests_total` (counter): requests by route, status
//! - `fact_proxy_request_duration_seconds` (histogram): handler latency
//! - `fact_proxy_upstream_calls_total` (counter): upstream calls by outcome
//! - `fact_proxy_upstream_duration_seconds` (histogram): upstream latency
//! - `fact_proxy_rate_limited_total` (counter): rejected requests
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "fact_proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("fact_proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(outcome: &'static str, start: Instant) {
    metrics::counter!("fact_proxy_upstream_calls_total", "outcome" => outcome).increment(1);
    metrics::histogram!("fact_proxy_upstream_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    metrics::counter!("fact_proxy_rate_limited_total").increment(1);
}
