//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by outcome, status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency by outcome
//! - `gateway_upstream_duration_seconds` (histogram): time spent in the upstream call
//! - `gateway_config_reloads_total` (counter): reloads by result
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;
use std::time::Instant;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(outcome: &'static str, status: u16, started: Instant) {
    counter!("gateway_requests_total", "outcome" => outcome, "status" => status.to_string())
        .increment(1);
    histogram!("gateway_request_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}

pub fn record_upstream_latency(started: Instant) {
    histogram!("gateway_upstream_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_config_reload(result: &'static str) {
    counter!("gateway_config_reloads_total", "result" => result).increment(1);
}
