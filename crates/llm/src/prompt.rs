//! Prompt Building
//!
//! Constructs the two-message chat prompt used to summarize an analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

use realty_chat_core::{Analysis, AnalysisMode};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes real-estate datasets. \
Given structured JSON data (years, prices, demand, table rows), produce a short (2-3 sentence) \
summary that highlights trends, recent demand, and price growth.";

const USER_INSTRUCTION: &str = "Write a concise plain-text summary (2-3 sentences).";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Summary prompt for one analysis
pub struct SummaryPrompt;

impl SummaryPrompt {
    /// System + user messages for `payload` under `mode`.
    ///
    /// The payload is embedded as pretty-printed JSON (two-space indent,
    /// non-ASCII left as is).
    pub fn build(payload: &Analysis, mode: AnalysisMode) -> Result<Vec<Message>, serde_json::Error> {
        let data = serde_json::to_string_pretty(&payload.to_payload())?;
        Ok(vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(format!("Mode: {}\nData:\n{}\n\n{}", mode, data, USER_INSTRUCTION)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_chat_core::{LocalitySlice, Record};

    #[test]
    fn test_prompt_layout() {
        let analysis = Analysis::PriceGrowth(LocalitySlice::new(
            "Akurdi",
            vec![Record::new("Akurdi", 2022, 3200i64, 50i64)],
        ));
        let messages = SummaryPrompt::build(&analysis, AnalysisMode::PriceGrowth).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.starts_with("You are a helpful assistant that summarizes real-estate datasets."));

        let user = &messages[1].content;
        assert!(user.starts_with("Mode: price_growth\nData:\n{\n  \""));
        assert!(user.contains("\"locality\": \"Akurdi\""));
        assert!(user.ends_with("\n\nWrite a concise plain-text summary (2-3 sentences)."));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }
}
