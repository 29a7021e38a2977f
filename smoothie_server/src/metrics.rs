//! Prometheus metrics for the order service.

use metrics::counter;

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record which strategy produced the page's database session.
pub fn session_acquired(source: &str) {
    counter!("smoothie_sessions_acquired_total", "source" => source.to_string()).increment(1);
}

/// Record a failed acquisition attempt.
pub fn session_attempt_failed(strategy: &str) {
    counter!("smoothie_session_attempt_failures_total", "strategy" => strategy.to_string())
        .increment(1);
}

/// Record a page load that found no usable session at all.
pub fn session_exhausted() {
    counter!("smoothie_sessions_exhausted_total").increment(1);
}

/// Record an order submission by outcome (placed, rejected, failed).
pub fn order_submitted(outcome: &str) {
    counter!("smoothie_orders_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a nutrition lookup by outcome (found, status, error).
pub fn nutrition_lookup(outcome: &str) {
    counter!("smoothie_nutrition_lookups_total", "outcome" => outcome.to_string()).increment(1);
}
