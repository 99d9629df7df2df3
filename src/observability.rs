use std::net::SocketAddr;
use std::time::Instant;

/// Counter: committed reservation operations. Labels: op.
pub const OPERATIONS_TOTAL: &str = "innkeep_operations_total";

/// Histogram: operation latency in seconds, check-then-write included. Labels: op.
pub const OPERATION_DURATION_SECONDS: &str = "innkeep_operation_duration_seconds";

/// Counter: availability checks rejected. Labels: kind (booked | blocked).
pub const CONFLICTS_TOTAL: &str = "innkeep_conflicts_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Record a committed operation: count plus latency.
pub(crate) fn record_op(op: &'static str, started: Instant) {
    metrics::counter!(OPERATIONS_TOTAL, "op" => op).increment(1);
    metrics::histogram!(OPERATION_DURATION_SECONDS, "op" => op)
        .record(started.elapsed().as_secs_f64());
}
