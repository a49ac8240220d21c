//! Centralized constants for the real-estate query service
//!
//! Default values shared by settings, the server and the summarizer.

/// Service endpoints
pub mod endpoints {
    /// OpenAI-compatible chat completions base URL
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";

    /// Default listen port
    pub const SERVER_PORT: u16 = 8000;
}

/// Dataset defaults
pub mod dataset {
    /// Path of the locality sheet, relative to the working directory
    pub const DEFAULT_PATH: &str = "data/sample_real_estate.csv";

    /// File name offered by the CSV download endpoint
    pub const EXPORT_FILENAME: &str = "sample_real_estate.csv";
}

/// Summarizer defaults
pub mod summarizer {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

    /// Reply length cap (2-3 sentences)
    pub const MAX_TOKENS: usize = 150;

    pub const TEMPERATURE: f32 = 0.4;

    /// Hard cap on the whole completion call
    pub const TIMEOUT_MS: u64 = 8_000;

    /// Environment variables checked for an API key, in order
    pub const API_KEY_VARS: [&str; 2] = ["OPENAI_API_KEY", "OPENAI_APIKEY"];
}

/// Environment variable names
pub mod env {
    /// Selects `config/{env}.yaml`
    pub const ENVIRONMENT: &str = "REALTY_CHAT_ENV";

    /// Prefix for per-field overrides, e.g. `REALTY_CHAT__SERVER__PORT`
    pub const PREFIX: &str = "REALTY_CHAT";
}
