//! Intent Classification
//!
//! Ordered keyword rules, first match wins:
//!
//! 1. contains "compare" → Comparison
//! 2. contains "price growth" or "last" → PriceGrowth
//! 3. anything else → Single
//!
//! Matching is plain substring search on the normalized query, so "compare"
//! also fires inside "comparison" and "last" inside "lastly".

use realty_chat_core::AnalysisMode;

const COMPARISON_KEYWORDS: &[&str] = &["compare"];
const PRICE_GROWTH_KEYWORDS: &[&str] = &["price growth", "last"];

/// Keyword-rule intent classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    /// Rules in priority order
    rules: Vec<(AnalysisMode, Vec<String>)>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        let to_owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        Self {
            rules: vec![
                (AnalysisMode::Comparison, to_owned(COMPARISON_KEYWORDS)),
                (AnalysisMode::PriceGrowth, to_owned(PRICE_GROWTH_KEYWORDS)),
            ],
        }
    }

    /// Classify a normalized (lowercased, trimmed) query
    pub fn classify(&self, query: &str) -> AnalysisMode {
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| query.contains(k.as_str())))
            .map(|(mode, _)| *mode)
            .unwrap_or(AnalysisMode::Single)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
