//! Prometheus metrics for the todo API.
//!
//! Counters track resource mutations and rejected input. The recorder is
//! installed once at startup; the returned handle is threaded into app state
//! and rendered by the `/metrics` route.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Todos created counter metric name.
pub const METRIC_TODOS_CREATED: &str = "todos_created_total";
/// Todos updated counter metric name.
pub const METRIC_TODOS_UPDATED: &str = "todos_updated_total";
/// Todos deleted counter metric name.
pub const METRIC_TODOS_DELETED: &str = "todos_deleted_total";
/// Rejected request counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "validation_failures_total";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup; the handle renders scrape output.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(METRIC_TODOS_CREATED, "Total number of todos created");
    describe_counter!(METRIC_TODOS_UPDATED, "Total number of todos updated");
    describe_counter!(METRIC_TODOS_DELETED, "Total number of todos deleted");
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of requests rejected by input validation"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Increment the todos created counter.
pub fn inc_todos_created() {
    counter!(METRIC_TODOS_CREATED).increment(1);
}

/// Increment the todos updated counter.
pub fn inc_todos_updated() {
    counter!(METRIC_TODOS_UPDATED).increment(1);
}

/// Increment the todos deleted counter.
pub fn inc_todos_deleted() {
    counter!(METRIC_TODOS_DELETED).increment(1);
}

/// Increment the validation failure counter.
pub fn inc_validation_failures() {
    counter!(METRIC_VALIDATION_FAILURES).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_safe_without_a_recorder() {
        // The metrics facade no-ops when no recorder is installed.
        inc_todos_created();
        inc_todos_updated();
        inc_todos_deleted();
        inc_validation_failures();
    }
}
