//! Real-Estate Query Server
//!
//! Provides the HTTP endpoints for locality analysis and dataset export.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_analysis, record_analyze_duration, record_request};
pub use state::{build_summarizer, AppState};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use realty_chat_data::DataError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Metrics error: {0}")]
    Metrics(String),
}

impl From<DataError> for ServerError {
    fn from(err: DataError) -> Self {
        ServerError::Dataset(err.to_string())
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Dataset(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::from(self), body).into_response()
    }
}
