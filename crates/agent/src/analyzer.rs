//! Query Analyzer
//!
//! Per-request flow:
//!
//! ```text
//! normalize → classify → resolve localities → slice → summarize → AnalysisResult
//! ```
//!
//! Every branch ends in exactly one result; user-facing failures are
//! [`QueryError`] values, never panics or transport errors.

use std::sync::Arc;

use realty_chat_core::{Analysis, AnalysisMode, QueryError, Summarizer};
use realty_chat_data::Dataset;
use realty_chat_llm::FallbackSummarizer;
use realty_chat_text_processing::{normalize_query, window_years, IntentClassifier, LocalityIndex};

use crate::response::AnalysisResult;

/// Answers natural-language locality queries over a shared dataset
pub struct QueryAnalyzer {
    dataset: Arc<Dataset>,
    index: LocalityIndex,
    classifier: IntentClassifier,
    summarizer: Arc<dyn Summarizer>,
}

impl QueryAnalyzer {
    pub fn new(dataset: Arc<Dataset>, summarizer: Arc<dyn Summarizer>) -> Self {
        let index = LocalityIndex::new(dataset.areas());
        Self {
            dataset,
            index,
            classifier: IntentClassifier::new(),
            summarizer,
        }
    }

    /// Analyzer using only the deterministic summary
    pub fn with_fallback(dataset: Arc<Dataset>) -> Self {
        Self::new(dataset, Arc::new(FallbackSummarizer::new()))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &LocalityIndex {
        &self.index
    }

    pub fn summarizer_name(&self) -> &str {
        self.summarizer.name()
    }

    /// Full request: resolve the data, then summarize it
    pub async fn analyze(&self, raw_query: &str) -> AnalysisResult {
        let query = normalize_query(raw_query);
        let mode = self.classifier.classify(&query);

        match self.resolve(&query, mode) {
            Ok(analysis) => {
                let summary = self.summarizer.summarize(&analysis, mode).await;
                tracing::debug!(
                    mode = %mode,
                    localities = ?analysis.slices().iter().map(|s| s.locality()).collect::<Vec<_>>(),
                    rows = analysis.slices().iter().map(|s| s.rows().len()).sum::<usize>(),
                    summarizer = self.summarizer.name(),
                    "Query analyzed"
                );
                AnalysisResult::Success { analysis, summary }
            },
            Err(err) => {
                tracing::info!(mode = %mode, query = %query, error = %err, "Query rejected");
                AnalysisResult::Error(err)
            },
        }
    }

    /// Data half of [`analyze`](Self::analyze) for an already normalized query
    pub fn resolve(&self, query: &str, mode: AnalysisMode) -> Result<Analysis, QueryError> {
        match mode {
            AnalysisMode::Comparison => self.resolve_comparison(query),
            AnalysisMode::PriceGrowth => self.resolve_price_growth(query),
            AnalysisMode::Single => self.resolve_single(query),
        }
    }

    fn resolve_comparison(&self, query: &str) -> Result<Analysis, QueryError> {
        let candidates = self.index.comparison_candidates(query);
        let (a, b) = match candidates.as_slice() {
            [a, b, ..] => (a, b),
            _ => return Err(QueryError::TwoLocalitiesRequired),
        };

        match (self.dataset.slice(a), self.dataset.slice(b)) {
            (Some(first), Some(second)) => Ok(Analysis::Comparison { first, second }),
            _ => Err(QueryError::ComparisonLocalityNotFound),
        }
    }

    fn resolve_price_growth(&self, query: &str) -> Result<Analysis, QueryError> {
        let window = window_years(query);
        let locality = self
            .index
            .price_growth_candidate(query)
            .ok_or(QueryError::LocalityUndetectable)?;

        let slice = self
            .dataset
            .slice(&locality)
            .ok_or(QueryError::LocalityNotFound)?;

        Ok(Analysis::PriceGrowth(slice.trailing(window)))
    }

    fn resolve_single(&self, query: &str) -> Result<Analysis, QueryError> {
        let locality = self.index.single_candidate(query);
        self.dataset
            .slice(&locality)
            .map(Analysis::Single)
            .ok_or(QueryError::LocalityNotFound)
    }
}
