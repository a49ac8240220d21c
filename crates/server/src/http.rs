//! HTTP Endpoints
//!
//! REST API for locality analysis and dataset export. Analyze always answers
//! 200; query problems travel in the `error` field of the body.

use std::time::{Duration, Instant};

use axum::{
    extract::{Json, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use realty_chat_agent::AnalysisResult;
use realty_chat_config::constants::dataset::EXPORT_FILENAME;

use crate::metrics::{metrics_handler, record_analysis, record_analyze_duration, record_request};
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config.server.cors_origins, state.config.server.cors_enabled);
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/download", post(download))
        .route("/analyze", post(analyze))
        .route("/download", post(download))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer
/// - If cors_origins is empty or all invalid, allows localhost:3000 only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to {}", DEFAULT_CORS_ORIGIN);
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static(DEFAULT_CORS_ORIGIN))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Analyze request body
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: String,
}

/// Analyze a natural-language query.
///
/// A missing or unreadable body is treated as an empty query.
async fn analyze(
    State(state): State<AppState>,
    body: Option<Json<AnalyzeRequest>>,
) -> Json<AnalysisResult> {
    record_request("analyze");
    let start = Instant::now();

    let request = body.map(|Json(b)| b).unwrap_or_default();
    let result = state.analyzer.analyze(&request.query).await;

    record_analysis(result.label());
    record_analyze_duration(start.elapsed().as_secs_f64());

    Json(result)
}

/// One area name or several
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AreaFilter {
    One(String),
    Many(Vec<String>),
}

impl AreaFilter {
    fn is_empty(&self) -> bool {
        match self {
            AreaFilter::One(area) => area.is_empty(),
            AreaFilter::Many(areas) => areas.is_empty(),
        }
    }

    fn into_vec(self) -> Vec<String> {
        match self {
            AreaFilter::One(area) => vec![area],
            AreaFilter::Many(areas) => areas,
        }
    }
}

/// Download request body
#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub areas: Option<AreaFilter>,
    #[serde(default)]
    pub area: Option<AreaFilter>,
}

impl DownloadRequest {
    /// First non-empty of `areas`, `area`; none means no filter
    pub fn filter(self) -> Vec<String> {
        self.areas
            .filter(|f| !f.is_empty())
            .or(self.area.filter(|f| !f.is_empty()))
            .map(AreaFilter::into_vec)
            .unwrap_or_default()
    }
}

/// Export dataset rows as a CSV attachment
async fn download(
    State(state): State<AppState>,
    body: Option<Json<DownloadRequest>>,
) -> Result<impl IntoResponse, ServerError> {
    record_request("download");

    let areas = body.map(|Json(b)| b.filter()).unwrap_or_default();
    let csv = state
        .dataset()
        .export_csv(&areas)
        .map_err(|e| ServerError::Export(e.to_string()))?;

    tracing::debug!(areas = ?areas, bytes = csv.len(), "Dataset export");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    record_request("health");
    let dataset = state.dataset();

    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "dataset": {
            "rows": dataset.len(),
            "localities": state.analyzer.index().len(),
        },
        "summarizer": state.analyzer.summarizer_name(),
        "llm_enabled": state.llm_enabled(),
    }))
}
