//! Metrics collection and exposition.
//!
//! # Metrics
//! - `exchange_requests_total` (counter): finished exchanges by `outcome`
//!   (`concluded`, `handled`, `problem`)
//! - `exchange_negotiation_failures_total` (counter): rejected requests by
//!   `header` (`content-type`, `accept`)
//! - `exchange_bind_failures_total` (counter): request bodies that failed to parse
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until a recorder exists
//! - Prometheus exporter is opt-in from config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub fn record_outcome(outcome: &'static str) {
    ::metrics::counter!("exchange_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_negotiation_failure(header: &'static str) {
    ::metrics::counter!("exchange_negotiation_failures_total", "header" => header).increment(1);
}

pub fn record_bind_failure() {
    ::metrics::counter!("exchange_bind_failures_total").increment(1);
}

/// Install the Prometheus recorder with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}
