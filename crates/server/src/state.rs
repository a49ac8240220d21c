//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;
use std::time::Duration;

use realty_chat_agent::QueryAnalyzer;
use realty_chat_config::{Settings, SummarizerConfig};
use realty_chat_core::Summarizer;
use realty_chat_data::Dataset;
use realty_chat_llm::{FallbackSummarizer, LlmSummarizer, OpenAIBackend, OpenAIConfig};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Settings as loaded at startup
    pub config: Arc<Settings>,
    /// Analyzer holding the read-only dataset
    pub analyzer: Arc<QueryAnalyzer>,
}

impl AppState {
    pub fn new(config: Settings, analyzer: QueryAnalyzer) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
        }
    }

    /// Load the dataset and pick the summarizer from settings
    pub fn from_settings(config: Settings) -> Result<Self, ServerError> {
        let dataset = Arc::new(Dataset::load(&config.dataset.path)?);
        let summarizer = build_summarizer(&config.summarizer);
        let analyzer = QueryAnalyzer::new(dataset, summarizer);

        tracing::info!(
            localities = analyzer.index().len(),
            summarizer = analyzer.summarizer_name(),
            "Initialized application state"
        );

        Ok(Self::new(config, analyzer))
    }

    pub fn dataset(&self) -> &Dataset {
        self.analyzer.dataset()
    }

    /// Whether summaries come from the LLM (with fallback) rather than the local text only
    pub fn llm_enabled(&self) -> bool {
        self.analyzer.summarizer_name() == "llm"
    }
}

/// LLM summarizer when enabled and a key resolves, else the deterministic one
pub fn build_summarizer(config: &SummarizerConfig) -> Arc<dyn Summarizer> {
    if !config.enabled {
        tracing::info!("LLM summarizer disabled, using fallback summaries");
        return Arc::new(FallbackSummarizer::new());
    }

    let Some(api_key) = config.resolved_api_key() else {
        tracing::info!("No OpenAI API key found, using fallback summaries");
        return Arc::new(FallbackSummarizer::new());
    };

    match OpenAIBackend::new(OpenAIConfig::from_settings(config, api_key)) {
        Ok(backend) => {
            tracing::info!(
                model = %config.model,
                endpoint = %config.endpoint,
                timeout_ms = config.timeout_ms,
                "LLM summarizer enabled"
            );
            Arc::new(LlmSummarizer::new(
                Arc::new(backend),
                Duration::from_millis(config.timeout_ms),
            ))
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create LLM backend, using fallback summaries");
            Arc::new(FallbackSummarizer::new())
        },
    }
}
