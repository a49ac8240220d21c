//! Summarizer trait

use async_trait::async_trait;

use crate::analysis::{Analysis, AnalysisMode};

/// Produces a short natural-language summary of an analysis payload.
///
/// Implementations never fail: any internal error must resolve to a
/// deterministic local summary.
///
/// # Example
///
/// ```ignore
/// let text = summarizer.summarize(&analysis, analysis.mode()).await;
/// ```
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `payload` for the given mode
    async fn summarize(&self, payload: &Analysis, mode: AnalysisMode) -> String;

    /// Summarizer name for logging
    fn name(&self) -> &str;
}
