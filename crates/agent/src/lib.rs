//! Query Analysis Agent
//!
//! Features:
//! - Intent routing (single, comparison, price growth)
//! - Locality resolution against the dataset with per-intent fallbacks
//! - Trailing-window slicing for price growth
//! - Summarizer injection (LLM or deterministic fallback)
//! - Response shaping into the wire JSON

pub mod analyzer;
pub mod response;

pub use analyzer::QueryAnalyzer;
pub use response::AnalysisResult;
