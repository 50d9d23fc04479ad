//! Prometheus metrics
//!
//! Installs the global recorder. Counters are emitted with the `metrics`
//! macros where the events happen (retrieval client, telephony service).

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder for this process
///
/// Only the first call per process can succeed.
pub fn init_metrics() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| e.to_string())
}
