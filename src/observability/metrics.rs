//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): forwarded requests by outcome
//! - `relay_upstream_duration_seconds` (histogram): time spent on the
//!   upstream call, by outcome
//! - `relay_upstream_errors_total` (counter): failures by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::upstream::UpstreamError;

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one forwarded request.
pub fn record_forward(outcome: &Result<String, UpstreamError>, start: Instant) {
    let label = match outcome {
        Ok(_) => "success",
        Err(e) => {
            metrics::counter!("relay_upstream_errors_total", "kind" => e.kind()).increment(1);
            "error"
        }
    };

    metrics::counter!("relay_requests_total", "outcome" => label).increment(1);
    metrics::histogram!("relay_upstream_duration_seconds", "outcome" => label)
        .record(start.elapsed().as_secs_f64());
}
