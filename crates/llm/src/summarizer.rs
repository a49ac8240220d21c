//! Summarizers
//!
//! [`LlmSummarizer`] asks the chat backend for a short summary and resolves
//! every failure (timeout, transport, API, empty reply) to the
//! [`FallbackSummarizer`] text, so a request is never left without one.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use realty_chat_core::{Amount, Analysis, AnalysisMode, LocalitySlice, Summarizer};

use crate::backend::LlmBackend;
use crate::prompt::SummaryPrompt;
use crate::LlmError;

/// Text used when the data gives nothing to summarize
pub const NO_SUMMARY: &str = "No detailed summary available.";

/// Deterministic summary computed from the payload alone
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSummarizer;

impl FallbackSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`Summarizer::summarize`]
    pub fn summary(&self, payload: &Analysis, mode: AnalysisMode) -> String {
        let text = match (mode, payload) {
            (AnalysisMode::Comparison, Analysis::Comparison { first, second }) => {
                Some(comparison(first, second))
            },
            (AnalysisMode::Comparison, _) => None,
            (_, Analysis::Comparison { .. }) => None,
            (AnalysisMode::PriceGrowth, Analysis::Single(slice) | Analysis::PriceGrowth(slice)) => {
                price_growth(slice)
            },
            (AnalysisMode::Single, Analysis::Single(slice) | Analysis::PriceGrowth(slice)) => {
                single(slice)
            },
        };

        text.unwrap_or_else(|| NO_SUMMARY.to_string())
    }
}

fn latest(slice: &LocalitySlice) -> String {
    slice
        .series()
        .price
        .last()
        .map(Amount::to_string)
        .unwrap_or_else(|| "None".to_string())
}

fn comparison(first: &LocalitySlice, second: &LocalitySlice) -> String {
    let (a, b) = (first.locality(), second.locality());
    format!(
        "{a} shows a latest price of {} while {b} shows {}. {a} has shown steady growth compared to {b}.",
        latest(first),
        latest(second),
    )
}

fn price_growth(slice: &LocalitySlice) -> Option<String> {
    let series = slice.series();
    let (p0, pn) = (series.price.first()?, series.price.last()?);
    let (y0, yn) = (series.year.first()?, series.year.last()?);
    Some(format!(
        "Price moved from {p0} in {y0} to {pn} in {yn}, indicating growth over the period."
    ))
}

fn single(slice: &LocalitySlice) -> Option<String> {
    let series = slice.series();
    let (pmin, pmax) = Amount::bounds(&series.price)?;
    let (dmin, dmax) = Amount::bounds(&series.demand)
        .map(|(lo, hi)| (lo.to_string(), hi.to_string()))
        .unwrap_or_else(|| ("N/A".to_string(), "N/A".to_string()));
    Some(format!(
        "Prices range from {pmin} to {pmax}. Demand ranges from {dmin} to {dmax}."
    ))
}

#[async_trait]
impl Summarizer for FallbackSummarizer {
    async fn summarize(&self, payload: &Analysis, mode: AnalysisMode) -> String {
        self.summary(payload, mode)
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

/// Backend-generated summary under a hard deadline
pub struct LlmSummarizer {
    backend: Arc<dyn LlmBackend>,
    fallback: FallbackSummarizer,
    timeout: Duration,
}

impl LlmSummarizer {
    pub fn new(backend: Arc<dyn LlmBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            fallback: FallbackSummarizer,
            timeout,
        }
    }

    async fn generate(&self, payload: &Analysis, mode: AnalysisMode) -> Result<String, LlmError> {
        let messages = SummaryPrompt::build(payload, mode)
            .map_err(|e| LlmError::Generation(e.to_string()))?;

        let reply = tokio::time::timeout(self.timeout, self.backend.generate(&messages))
            .await
            .map_err(|_| LlmError::Timeout)??;

        let text = reply.trim();
        if text.is_empty() {
            return Err(LlmError::InvalidResponse("Empty completion".to_string()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, payload: &Analysis, mode: AnalysisMode) -> String {
        match self.generate(payload, mode).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    model = self.backend.model_name(),
                    mode = %mode,
                    "LLM summary failed, using fallback"
                );
                metrics::counter!("realty_chat_summarizer_fallbacks_total").increment(1);
                self.fallback.summary(payload, mode)
            },
        }
    }

    fn name(&self) -> &str {
        "llm"
    }
}
