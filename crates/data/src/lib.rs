//! Locality dataset
//!
//! Loads the per-locality year/price/demand sheet once at startup and serves
//! read-only slices of it:
//! - `Dataset::load` reads a headered CSV file or the first sheet of a workbook
//! - `Dataset::areas` feeds the locality index
//! - `Dataset::slice` selects one locality case-insensitively
//! - `Dataset::write_csv` exports (optionally filtered) rows

pub mod dataset;
pub mod export;

pub use dataset::{Column, Dataset};

use thiserror::Error;

/// Dataset errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Row {row}: invalid {column} value '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Dataset is empty: {0}")]
    Empty(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::Workbook(err.to_string())
    }
}
