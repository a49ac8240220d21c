//! LLM Integration for dataset summaries
//!
//! Features:
//! - OpenAI-compatible chat completions backend
//! - Prompt construction for analysis payloads
//! - `LlmSummarizer` with a hard timeout and silent fallback
//! - `FallbackSummarizer`, the deterministic local summary

pub mod backend;
pub mod prompt;
pub mod summarizer;

pub use backend::{LlmBackend, OpenAIBackend, OpenAIConfig};
pub use prompt::{Message, Role, SummaryPrompt};
pub use summarizer::{FallbackSummarizer, LlmSummarizer, NO_SUMMARY};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

