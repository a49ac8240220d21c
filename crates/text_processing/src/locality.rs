//! Locality Extraction
//!
//! The primary strategy is dataset driven: every known area whose lowercase
//! form occurs anywhere in the query is a match. Areas are scanned longest
//! first so that "Wakad Phata" is reported ahead of "Wakad", and the result
//! follows that scan order rather than the position in the query.
//!
//! When the dataset match comes up short, each intent has its own fallback:
//! - Comparison: split the query on delimiter substrings and take the first
//!   two fragments verbatim
//! - PriceGrowth: capture the letters and spaces after "for "
//! - Single: strip "analyze" / "analysis of" and use what remains
//!
//! Fallback candidates are not validated here; the dataset lookup that follows
//! decides whether they exist.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Comparison fallback delimiters, matched anywhere (not only on word boundaries)
static COMPARISON_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"compare|and|vs|versus|with").expect("valid comparison split regex"));

/// Price growth fallback: "for <letters and spaces>"
static FOR_LOCALITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for ([a-zA-Z ]+)").expect("valid locality capture regex"));

const SINGLE_STRIP_PHRASES: &[&str] = &["analyze", "analysis of"];

/// Known area names, longest first
#[derive(Debug, Clone, Default)]
pub struct LocalityIndex {
    /// (dataset spelling, lowercase form)
    entries: Vec<(String, String)>,
}

impl LocalityIndex {
    /// Build from area names. Exact duplicates are dropped; names of equal
    /// length keep their input order.
    pub fn new(areas: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<(String, String)> = areas
            .into_iter()
            .filter(|a| seen.insert(a.clone()))
            .map(|a| {
                let lower = a.to_lowercase();
                (a, lower)
            })
            .collect();

        entries.sort_by_key(|(name, _)| Reverse(name.chars().count()));

        tracing::debug!(localities = entries.len(), "Built locality index");
        Self { entries }
    }

    /// Area names in scan order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dataset-driven match: every area contained in `query`, in scan order
    pub fn find_in(&self, query: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, lower)| query.contains(lower.as_str()))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Comparison candidates: dataset matches when there are at least two,
    /// otherwise the delimiter-split fallback (at most two fragments).
    pub fn comparison_candidates(&self, query: &str) -> Vec<String> {
        let found = self.find_in(query);
        if found.len() >= 2 {
            return found;
        }

        let fragments = split_comparison(query);
        tracing::debug!(
            matched = found.len(),
            fragments = ?fragments,
            "Using delimiter fallback for comparison"
        );
        fragments
    }

    /// Price growth candidate: first dataset match, else the "for <text>" capture
    pub fn price_growth_candidate(&self, query: &str) -> Option<String> {
        self.find_in(query)
            .into_iter()
            .next()
            .or_else(|| capture_after_for(query))
    }

    /// Single-locality candidate: first dataset match, else the query with
    /// the analysis phrases removed
    pub fn single_candidate(&self, query: &str) -> String {
        self.find_in(query)
            .into_iter()
            .next()
            .unwrap_or_else(|| strip_analysis_phrases(query))
    }
}

/// First two non-empty trimmed fragments between delimiters
pub fn split_comparison(query: &str) -> Vec<String> {
    COMPARISON_SPLIT
        .split(query)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .take(2)
        .map(str::to_string)
        .collect()
}

/// Trimmed text captured after the first "for "
pub fn capture_after_for(query: &str) -> Option<String> {
    FOR_LOCALITY
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Query with "analyze" and "analysis of" removed, trimmed
pub fn strip_analysis_phrases(query: &str) -> String {
    SINGLE_STRIP_PHRASES
        .iter()
        .fold(query.to_string(), |text, phrase| text.replace(*phrase, ""))
        .trim()
        .to_string()
}
