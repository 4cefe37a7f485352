use commonware_runtime::{telemetry::metrics::status, Metrics as RuntimeMetrics};
use prometheus_client::metrics::counter::Counter;

/// Metrics for the [`Engine`](super::Engine).
#[derive(Default)]
pub struct Metrics {
    /// Number of selection changes
    pub selects: Counter,
    /// Number of completed fetches by status
    pub fetch: status::Counter,
}

impl Metrics {
    /// Create and return a new set of metrics, registered with the given context.
    pub fn init<E: RuntimeMetrics>(context: E) -> Self {
        let metrics = Metrics::default();
        context.register(
            "selects",
            "Number of selection changes",
            metrics.selects.clone(),
        );
        context.register(
            "fetch",
            "Number of completed fetches by status",
            metrics.fetch.clone(),
        );
        metrics
    }
}
