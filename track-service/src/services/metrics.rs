//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter, provides the /metrics body, and names
//! the domain counters recorded by the handlers.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Must run before any metrics are recorded. Later calls are no-ops, so test
/// binaries that build several applications can call it freely.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Prometheus recorder not installed: {}", e),
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_track_uploaded(has_cover: bool) {
    let cover = if has_cover { "true" } else { "false" };
    counter!("tracks_uploaded_total", "cover" => cover).increment(1);
}

pub fn record_track_liked() {
    counter!("track_likes_total").increment(1);
}

pub fn record_comment_created() {
    counter!("comments_created_total").increment(1);
}

pub fn record_comment_liked() {
    counter!("comment_likes_total").increment(1);
}
