//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Call once at startup before any metrics are recorded. A second call
/// fails because the global recorder is already installed.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
    })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!("metrics handle already initialized"))
    })
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a catalog read, whatever its outcome.
pub fn record_catalog_request(collection: &str) {
    counter!("catalog_requests_total", "collection" => collection.to_string()).increment(1);
}

/// Count documents returned to clients.
pub fn record_catalog_served(collection: &str, documents: usize) {
    counter!("catalog_documents_served_total", "collection" => collection.to_string())
        .increment(documents as u64);
}

pub fn record_scan_failure(collection: &str) {
    counter!("catalog_scan_failures_total", "collection" => collection.to_string()).increment(1);
}
