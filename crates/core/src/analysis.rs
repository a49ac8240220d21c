//! Analysis payload types
//!
//! An [`Analysis`] is the data half of a successful answer: one or two
//! [`LocalitySlice`]s tagged with the query intent. The summary text and the
//! JSON response envelope are built on top of it by the agent crate.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;

use crate::record::{Amount, Record};

/// Classified purpose of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    Single,
    Comparison,
    PriceGrowth,
}

impl AnalysisMode {
    /// Wire tag used in the `type` field and in summarizer prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Single => "single",
            AnalysisMode::Comparison => "comparison",
            AnalysisMode::PriceGrowth => "price_growth",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parallel year/price/demand sequences for one locality
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub year: Vec<i32>,
    pub price: Vec<Amount>,
    pub demand: Vec<Amount>,
}

impl Series {
    pub fn from_records(rows: &[Record]) -> Self {
        Self {
            year: rows.iter().map(|r| r.year).collect(),
            price: rows.iter().map(|r| r.price).collect(),
            demand: rows.iter().map(|r| r.demand).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
    }
}

/// Records of one locality together with the series derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct LocalitySlice {
    locality: String,
    rows: Vec<Record>,
    series: Series,
}

impl LocalitySlice {
    pub fn new(locality: impl Into<String>, rows: Vec<Record>) -> Self {
        let series = Series::from_records(&rows);
        Self {
            locality: locality.into(),
            rows,
            series,
        }
    }

    /// Name under which the slice was requested (not necessarily the dataset spelling)
    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Trailing window: sort ascending by year (stable) and keep the last `n` rows.
    ///
    /// Fewer than `n` rows are returned unchanged apart from ordering; `n == 0`
    /// yields an empty slice.
    pub fn trailing(self, n: usize) -> Self {
        let mut rows = self.rows;
        rows.sort_by_key(|r| r.year);
        let skip = rows.len().saturating_sub(n);
        rows.drain(..skip);
        Self::new(self.locality, rows)
    }

    /// `{year, price, demand}` object
    pub fn chart_json(&self) -> Value {
        json!(self.series)
    }

    /// One object per record, all columns
    pub fn table_json(&self) -> Value {
        json!(self.rows)
    }
}

/// Successful analysis, tagged by intent
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Single(LocalitySlice),
    PriceGrowth(LocalitySlice),
    Comparison {
        first: LocalitySlice,
        second: LocalitySlice,
    },
}

impl Analysis {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            Analysis::Single(_) => AnalysisMode::Single,
            Analysis::PriceGrowth(_) => AnalysisMode::PriceGrowth,
            Analysis::Comparison { .. } => AnalysisMode::Comparison,
        }
    }

    /// Slices in response order
    pub fn slices(&self) -> Vec<&LocalitySlice> {
        match self {
            Analysis::Single(slice) | Analysis::PriceGrowth(slice) => vec![slice],
            Analysis::Comparison { first, second } => vec![first, second],
        }
    }

    /// Structured payload handed to summarizers.
    ///
    /// Single-locality modes: `{locality, chartData: {year, price, demand}, tableData: [..]}`.
    /// Comparison: `{localities: [a, b], chartData: {a: {..}, b: {..}}, tableData: {a: [..], b: [..]}}`.
    pub fn to_payload(&self) -> Value {
        match self {
            Analysis::Single(slice) | Analysis::PriceGrowth(slice) => json!({
                "locality": slice.locality(),
                "chartData": slice.chart_json(),
                "tableData": slice.table_json(),
            }),
            Analysis::Comparison { first, second } => {
                let mut chart = Map::new();
                let mut table = Map::new();
                for slice in [first, second] {
                    chart.insert(slice.locality().to_string(), slice.chart_json());
                    table.insert(slice.locality().to_string(), slice.table_json());
                }
                json!({
                    "localities": [first.locality(), second.locality()],
                    "chartData": chart,
                    "tableData": table,
                })
            },
        }
    }
}

/// User-facing query failures, reported in the `error` field of a 200 response
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please specify two localities to compare.")]
    TwoLocalitiesRequired,

    #[error("One of the localities not found in dataset.")]
    ComparisonLocalityNotFound,

    #[error("Cannot detect the locality.")]
    LocalityUndetectable,

    #[error("Locality not found.")]
    LocalityNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wakad() -> Vec<Record> {
        vec![
            Record::new("Wakad", 2023, 5200i64, 90i64),
            Record::new("Wakad", 2021, 4500i64, 80i64),
            Record::new("Wakad", 2022, 4700i64, 85i64),
        ]
    }

    #[test]
    fn test_series_lengths_match_rows() {
        let slice = LocalitySlice::new("Wakad", wakad());
        assert_eq!(slice.series().len(), 3);
        assert_eq!(slice.series().price.len(), slice.series().demand.len());
        assert_eq!(slice.series().year, vec![2023, 2021, 2022]);
    }

    #[test]
    fn test_trailing_sorts_and_keeps_last() {
        let slice = LocalitySlice::new("Wakad", wakad()).trailing(2);
        assert_eq!(slice.series().year, vec![2022, 2023]);
        assert_eq!(slice.rows().len(), 2);
    }

    #[test]
    fn test_trailing_larger_window_keeps_all() {
        let slice = LocalitySlice::new("Wakad", wakad()).trailing(10);
        assert_eq!(slice.series().year, vec![2021, 2022, 2023]);
    }

    #[test]
    fn test_trailing_zero_is_empty() {
        let slice = LocalitySlice::new("Wakad", wakad()).trailing(0);
        assert!(slice.is_empty());
        assert!(slice.series().is_empty());
    }

    #[test]
    fn test_comparison_payload_shape() {
        let analysis = Analysis::Comparison {
            first: LocalitySlice::new("Wakad", wakad()),
            second: LocalitySlice::new("Aundh", vec![Record::new("Aundh", 2021, 6000i64, 70i64)]),
        };
        let payload = analysis.to_payload();

        assert_eq!(analysis.mode(), AnalysisMode::Comparison);
        assert_eq!(payload["localities"], json!(["Wakad", "Aundh"]));
        assert_eq!(payload["chartData"]["Aundh"]["price"], json!([6000]));
        assert_eq!(payload["tableData"]["Wakad"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_query_error_messages() {
        assert_eq!(
            QueryError::TwoLocalitiesRequired.to_string(),
            "Please specify two localities to compare."
        );
        assert_eq!(QueryError::LocalityNotFound.to_string(), "Locality not found.");
    }
}
