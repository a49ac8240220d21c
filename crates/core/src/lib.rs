//! Core traits and types for the real-estate query service
//!
//! This crate provides foundational types used across all other crates:
//! - Dataset rows (`Record`) and numeric cells (`Amount`)
//! - Per-locality series and slices
//! - The `Analysis` payload produced for every successful query
//! - User-facing query errors with their fixed messages
//! - The pluggable `Summarizer` trait

pub mod analysis;
pub mod record;
pub mod traits;

pub use analysis::{Analysis, AnalysisMode, LocalitySlice, QueryError, Series};
pub use record::{Amount, CellValue, Record};
pub use traits::Summarizer;
