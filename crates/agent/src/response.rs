//! Response Builder
//!
//! Wire shapes, all returned with HTTP 200:
//!
//! ```text
//! single / price_growth  {type, summary, chartData: {year, price, demand}, tableData: [row..]}
//! comparison             {type, summary, localities: [a, b],
//!                         chartData: {a: {year, price, demand, table}, b: {..}},
//!                         tableData: {a: [row..], b: [row..]}}
//! error                  {error}
//! ```
//!
//! Comparison objects are keyed by locality name; when both names are equal
//! the second entry replaces the first.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use realty_chat_core::{Analysis, AnalysisMode, LocalitySlice, QueryError};

/// Outcome of one analyze request
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Success { analysis: Analysis, summary: String },
    Error(QueryError),
}

impl AnalysisResult {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisResult::Error(_))
    }

    /// Mode of a successful result
    pub fn mode(&self) -> Option<AnalysisMode> {
        match self {
            AnalysisResult::Success { analysis, .. } => Some(analysis.mode()),
            AnalysisResult::Error(_) => None,
        }
    }

    /// `type` tag, or "error"
    pub fn label(&self) -> &'static str {
        self.mode().map(|m| m.as_str()).unwrap_or("error")
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            AnalysisResult::Success { summary, .. } => Some(summary),
            AnalysisResult::Error(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AnalysisResult::Error(err) => json!({ "error": err.to_string() }),
            AnalysisResult::Success { analysis, summary } => match analysis {
                Analysis::Single(slice) | Analysis::PriceGrowth(slice) => json!({
                    "type": analysis.mode().as_str(),
                    "summary": summary,
                    "chartData": slice.chart_json(),
                    "tableData": slice.table_json(),
                }),
                Analysis::Comparison { first, second } => {
                    let mut chart = Map::new();
                    let mut table = Map::new();
                    for slice in [first, second] {
                        chart.insert(slice.locality().to_string(), comparison_chart(slice));
                        table.insert(slice.locality().to_string(), slice.table_json());
                    }
                    json!({
                        "type": analysis.mode().as_str(),
                        "summary": summary,
                        "localities": [first.locality(), second.locality()],
                        "chartData": chart,
                        "tableData": table,
                    })
                },
            },
        }
    }
}

/// Series plus the rows it came from
fn comparison_chart(slice: &LocalitySlice) -> Value {
    let series = slice.series();
    json!({
        "year": series.year,
        "price": series.price,
        "demand": series.demand,
        "table": slice.table_json(),
    })
}

impl From<QueryError> for AnalysisResult {
    fn from(err: QueryError) -> Self {
        AnalysisResult::Error(err)
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_chat_core::{CellValue, Record};

    fn slice(name: &str, prices: &[i64]) -> LocalitySlice {
        let rows = prices
            .iter()
            .enumerate()
            .map(|(i, p)| Record::new(name, 2021 + i as i32, *p, 50i64 + i as i64))
            .collect();
        LocalitySlice::new(name, rows)
    }

    #[test]
    fn test_single_shape() {
        let result = AnalysisResult::Success {
            analysis: Analysis::Single(slice("Wakad", &[4500, 4700, 5200])),
            summary: "ok".to_string(),
        };
        let json = result.to_json();

        assert_eq!(json["type"], "single");
        assert_eq!(json["summary"], "ok");
        assert_eq!(json["chartData"]["price"], json!([4500, 4700, 5200]));
        assert_eq!(json["chartData"]["year"], json!([2021, 2022, 2023]));
        assert_eq!(json["tableData"][0]["area"], "Wakad");
        assert!(json.get("localities").is_none());
        assert_eq!(result.label(), "single");
    }

    #[test]
    fn test_table_rows_keep_extra_columns() {
        let rows = vec![Record::new("Aundh", 2022, 6000i64, 70i64)
            .with_extra("total_sales", CellValue::Integer(120))];
        let result = AnalysisResult::Success {
            analysis: Analysis::PriceGrowth(LocalitySlice::new("Aundh", rows)),
            summary: String::new(),
        };
        let json = result.to_json();

        assert_eq!(json["type"], "price_growth");
        assert_eq!(
            json["tableData"],
            json!([{"area": "Aundh", "year": 2022, "price": 6000, "demand": 70, "total_sales": 120}])
        );
    }

    #[test]
    fn test_comparison_shape() {
        let result = AnalysisResult::Success {
            analysis: Analysis::Comparison {
                first: slice("Wakad", &[4500, 4700]),
                second: slice("Aundh", &[6000]),
            },
            summary: "cmp".to_string(),
        };
        let json = result.to_json();

        assert_eq!(json["type"], "comparison");
        assert_eq!(json["localities"], json!(["Wakad", "Aundh"]));
        assert_eq!(json["chartData"].as_object().unwrap().len(), 2);
        assert_eq!(json["chartData"]["Wakad"]["price"], json!([4500, 4700]));
        assert_eq!(json["chartData"]["Aundh"]["table"][0]["price"], 6000);
        assert_eq!(json["tableData"]["Wakad"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_comparison_same_name_collapses() {
        let result = AnalysisResult::Success {
            analysis: Analysis::Comparison {
                first: slice("wakad", &[1]),
                second: slice("wakad", &[2]),
            },
            summary: String::new(),
        };
        let json = result.to_json();

        assert_eq!(json["localities"], json!(["wakad", "wakad"]));
        assert_eq!(json["chartData"].as_object().unwrap().len(), 1);
        assert_eq!(json["chartData"]["wakad"]["price"], json!([2]));
    }

    #[test]
    fn test_error_shape() {
        let result = AnalysisResult::from(QueryError::LocalityNotFound);
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"error":"Locality not found."}"#
        );
        assert!(result.is_error());
        assert_eq!(result.label(), "error");
        assert!(result.summary().is_none());
    }
}
