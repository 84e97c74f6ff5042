//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vaas_hook_registrations_total` (counter): by outcome (success, failure, skipped)
//! - `vaas_hook_deregistrations_total` (counter): by outcome
//! - `vaas_hook_task_polls_total` (counter): by fetched task status or error
//! - `vaas_hook_task_wait_seconds` (histogram): time spent waiting on queued changes
//!
//! # Design Decisions
//! - Metric calls are no-ops until a recorder is installed
//! - Prometheus endpoint only when enabled in config

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    metrics::describe_counter!(
        "vaas_hook_registrations_total",
        "Backend registrations by outcome"
    );
    metrics::describe_counter!(
        "vaas_hook_deregistrations_total",
        "Backend deletions by outcome"
    );
    metrics::describe_counter!(
        "vaas_hook_task_polls_total",
        "VaaS task status checks by result"
    );
    metrics::describe_histogram!(
        "vaas_hook_task_wait_seconds",
        metrics::Unit::Seconds,
        "Time spent waiting for queued VaaS changes"
    );

    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}
