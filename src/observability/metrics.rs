//! Metrics collection and exposition.
//!
//! # Metrics
//! - `passenger_requests_total` (counter): requests by status
//! - `passenger_request_duration_seconds` (histogram): handler latency
//! - `passenger_records_served_total` (counter): passenger nodes written
//! - `passenger_dataset_records` (gauge): records loaded at startup

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!("passenger_requests_total", "status" => status).increment(1);
    metrics::histogram!("passenger_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_records_served(count: usize) {
    metrics::counter!("passenger_records_served_total").increment(count as u64);
}

pub fn record_dataset_size(count: usize) {
    metrics::gauge!("passenger_dataset_records").set(count as f64);
}
