//! Observability Metrics
//!
//! Prometheus metrics endpoint for monitoring.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::ServerError;

/// Global Prometheus handle
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Must be called once at startup before recording any metrics; until then
/// the record helpers are no-ops.
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    register_default_metrics();

    METRICS_HANDLE.get_or_init(|| handle.clone());
    Ok(handle)
}

/// Get the global metrics handle
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Register default application metrics
fn register_default_metrics() {
    for endpoint in ["analyze", "download", "health"] {
        counter!("realty_chat_requests_total", "endpoint" => endpoint).absolute(0);
    }

    for kind in ["single", "comparison", "price_growth", "error"] {
        counter!("realty_chat_analysis_total", "type" => kind).absolute(0);
    }

    counter!("realty_chat_summarizer_fallbacks_total").absolute(0);
}

/// Record request to endpoint
pub fn record_request(endpoint: &'static str) {
    counter!("realty_chat_requests_total", "endpoint" => endpoint).increment(1);
}

/// Record analysis outcome by result type
pub fn record_analysis(kind: &'static str) {
    counter!("realty_chat_analysis_total", "type" => kind).increment(1);
}

/// Record end-to-end analyze latency
pub fn record_analyze_duration(duration_secs: f64) {
    histogram!("realty_chat_analyze_duration_seconds").record(duration_secs);
}

/// Metrics endpoint handler
///
/// Returns Prometheus-formatted metrics.
pub async fn metrics_handler() -> impl IntoResponse {
    match get_metrics_handle() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized".to_string(),
        ),
    }
}
