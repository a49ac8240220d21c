//! Integration tests for query analysis over the bundled dataset
//!
//! These tests drive `QueryAnalyzer` end to end and check the wire JSON.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use realty_chat_agent::{AnalysisResult, QueryAnalyzer};
use realty_chat_core::{Analysis, AnalysisMode, Summarizer};
use realty_chat_data::Dataset;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/sample_real_estate.csv");

fn dataset() -> Arc<Dataset> {
    Arc::new(Dataset::load(FIXTURE).expect("fixture dataset loads"))
}

async fn ask(query: &str) -> Value {
    QueryAnalyzer::with_fallback(dataset()).analyze(query).await.to_json()
}

/// Records every mode it is asked to summarize
#[derive(Default)]
struct RecordingSummarizer {
    modes: Mutex<Vec<AnalysisMode>>,
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, _payload: &Analysis, mode: AnalysisMode) -> String {
        self.modes.lock().unwrap().push(mode);
        format!("summary for {mode}")
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[tokio::test]
async fn test_single_locality_analysis() {
    let json = ask("Give me analysis of Wakad").await;

    assert_eq!(json["type"], "single");
    assert_eq!(json["chartData"]["year"], json!([2021, 2022, 2023]));
    assert_eq!(json["chartData"]["price"], json!([4500, 4700, 5200]));
    assert_eq!(json["tableData"].as_array().unwrap().len(), 3);
    assert_eq!(json["tableData"][0]["total_sales"], 1180);
    assert_eq!(
        json["summary"],
        "Prices range from 4500 to 5200. Demand ranges from 80 to 90."
    );
}

#[tokio::test]
async fn test_alternative_single_phrasing() {
    let json = ask("Analyze Kalyani Nagar").await;
    assert_eq!(json["type"], "single");
    assert_eq!(json["chartData"]["price"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_single_keeps_dataset_order() {
    let json = ask("analysis of akurdi").await;
    assert_eq!(json["chartData"]["year"], json!([2022, 2020, 2023, 2021]));
}

#[tokio::test]
async fn test_comparison_mode() {
    let json = ask("Compare Ambegaon Budruk and Aundh demand trends").await;

    assert_eq!(json["type"], "comparison");
    assert_eq!(json["localities"], json!(["Ambegaon Budruk", "Aundh"]));

    let chart = json["chartData"].as_object().unwrap();
    assert_eq!(chart.len(), 2);
    assert_eq!(json["chartData"]["Aundh"]["price"], json!([7600, 7900, 8350]));
    assert_eq!(json["chartData"]["Aundh"]["table"].as_array().unwrap().len(), 3);
    assert_eq!(json["tableData"]["Ambegaon Budruk"].as_array().unwrap().len(), 3);
    assert_eq!(
        json["summary"],
        "Ambegaon Budruk shows a latest price of 4400 while Aundh shows 8350. \
         Ambegaon Budruk has shown steady growth compared to Aundh."
    );
}

#[tokio::test]
async fn test_comparison_order_follows_name_length() {
    let json = ask("compare aundh with hinjewadi").await;
    assert_eq!(json["localities"], json!(["Hinjewadi", "Aundh"]));
}

#[tokio::test]
async fn test_comparison_with_single_locality() {
    let json = ask("Compare Wakad with nothing").await;
    assert_eq!(json, json!({"error": "One of the localities not found in dataset."}));

    let json = ask("compare wakad").await;
    assert_eq!(json, json!({"error": "Please specify two localities to compare."}));
}

#[tokio::test]
async fn test_price_growth_mode() {
    let json = ask("Show price growth for Akurdi over the last 3 years").await;

    assert_eq!(json["type"], "price_growth");
    assert_eq!(json["chartData"]["year"], json!([2021, 2022, 2023]));
    assert_eq!(json["chartData"]["price"], json!([3000, 3200, 3500]));
    assert_eq!(
        json["summary"],
        "Price moved from 3000 in 2021 to 3500 in 2023, indicating growth over the period."
    );
}

#[tokio::test]
async fn test_price_growth_with_different_years() {
    let json = ask("Show price growth for Wakad over the last 2 years").await;
    assert_eq!(json["chartData"]["year"], json!([2022, 2023]));
    assert_eq!(json["tableData"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_price_growth_window_larger_than_data() {
    let json = ask("price growth for hinjewadi over the last 10 years").await;
    assert_eq!(json["chartData"]["year"], json!([2021, 2022, 2023]));
    assert_eq!(json["chartData"]["price"], json!([5600, 5850, 6250.5]));
}

#[tokio::test]
async fn test_price_growth_default_window() {
    let json = ask("show price growth for akurdi").await;
    assert_eq!(json["chartData"]["year"], json!([2021, 2022, 2023]));
}

#[tokio::test]
async fn test_price_growth_errors() {
    let json = ask("show me the price growth").await;
    assert_eq!(json, json!({"error": "Cannot detect the locality."}));

    let json = ask("price growth for baner").await;
    assert_eq!(json, json!({"error": "Locality not found."}));
}

#[tokio::test]
async fn test_unknown_or_unrelated_queries_error() {
    for query in ["Analyze NonExistentArea", "Tell me a story about real estate", ""] {
        let json = ask(query).await;
        assert_eq!(json, json!({"error": "Locality not found."}), "query: {query}");
    }
}

#[tokio::test]
async fn test_repeated_query_is_identical() {
    let analyzer = QueryAnalyzer::with_fallback(dataset());
    let first = serde_json::to_string(&analyzer.analyze("compare wakad and aundh").await).unwrap();
    let second = serde_json::to_string(&analyzer.analyze("compare wakad and aundh").await).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_summarizer_receives_classified_mode() {
    let summarizer = Arc::new(RecordingSummarizer::default());
    let analyzer = QueryAnalyzer::new(dataset(), summarizer.clone());

    let result = analyzer.analyze("compare wakad and aundh").await;
    assert_eq!(result.summary(), Some("summary for comparison"));

    analyzer.analyze("wakad over the last 2 years").await;
    analyzer.analyze("analyze aundh").await;

    let error = analyzer.analyze("analyze baner").await;
    assert!(matches!(error, AnalysisResult::Error(_)));

    assert_eq!(
        *summarizer.modes.lock().unwrap(),
        vec![AnalysisMode::Comparison, AnalysisMode::PriceGrowth, AnalysisMode::Single]
    );
    assert_eq!(analyzer.summarizer_name(), "recording");
}
