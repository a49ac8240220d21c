//! Query understanding for the real-estate query service
//!
//! This crate turns a raw query into the pieces the analyzer needs:
//! - **Intent Classification**: Comparison / PriceGrowth / Single by ordered keyword rules
//! - **Locality Extraction**: longest-first dataset matching with per-intent fallbacks
//! - **Parameter Extraction**: the "last N years" window for price growth queries
//!
//! Every function expects the query already normalized with [`normalize_query`].
//!
//! # Example
//!
//! ```
//! use realty_chat_core::AnalysisMode;
//! use realty_chat_text_processing::{normalize_query, IntentClassifier, LocalityIndex};
//!
//! let index = LocalityIndex::new(["Wakad".to_string(), "Aundh".to_string()]);
//! let query = normalize_query("  Compare Wakad and Aundh ");
//!
//! assert_eq!(IntentClassifier::new().classify(&query), AnalysisMode::Comparison);
//! assert_eq!(index.find_in(&query), vec!["Wakad", "Aundh"]);
//! ```

pub mod intent;
pub mod locality;
pub mod params;

pub use intent::IntentClassifier;
pub use locality::LocalityIndex;
pub use params::{window_years, DEFAULT_WINDOW_YEARS};

/// Lowercase and trim a raw query
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}
