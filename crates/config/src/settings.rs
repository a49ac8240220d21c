//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{dataset, endpoints, env, summarizer};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Locality dataset
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Optional LLM summarizer
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_dataset()?;
        self.validate_summarizer()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout cannot be 0".to_string(),
            });
        }

        Ok(())
    }

    fn validate_dataset(&self) -> Result<(), ConfigError> {
        if self.dataset.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "dataset.path".to_string(),
                message: "Dataset path is required".to_string(),
            });
        }

        if !Path::new(&self.dataset.path).exists() {
            if self.environment.is_strict() {
                return Err(ConfigError::FileNotFound(self.dataset.path.clone()));
            }
            tracing::warn!(path = %self.dataset.path, "Dataset file not found");
        }

        Ok(())
    }

    fn validate_summarizer(&self) -> Result<(), ConfigError> {
        let s = &self.summarizer;

        if !(0.0..=2.0).contains(&s.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", s.temperature),
            });
        }

        if s.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.timeout_ms".to_string(),
                message: "Timeout cannot be 0".to_string(),
            });
        }

        if s.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.max_tokens".to_string(),
                message: "max_tokens cannot be 0".to_string(),
            });
        }

        // The summarizer has to give up before the request deadline does
        let request_budget_ms = self.server.timeout_seconds.saturating_mul(1000);
        if s.timeout_ms >= request_budget_ms {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.timeout_ms".to_string(),
                message: format!(
                    "Must be below server.timeout_seconds ({} ms), got {}",
                    request_budget_ms, s.timeout_ms
                ),
            });
        }

        if self.environment.is_production() && s.enabled && s.resolved_api_key().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.api_key".to_string(),
                message: "API key required when the summarizer is enabled in production".to_string(),
            });
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    endpoints::SERVER_PORT
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: default_true(),
            // Empty by default; the router falls back to localhost:3000
            cors_origins: Vec::new(),
        }
    }
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV file with area/year/price/demand columns
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

fn default_dataset_path() -> String {
    dataset::DEFAULT_PATH.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// LLM summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Use the LLM when an API key is available
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// OpenAI-compatible base URL
    #[serde(default = "default_summarizer_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_summarizer_model")]
    pub model: String,

    /// API key; falls back to OPENAI_API_KEY / OPENAI_APIKEY
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Hard cap on one summarization call
    #[serde(default = "default_summarizer_timeout")]
    pub timeout_ms: u64,
}

fn default_summarizer_endpoint() -> String {
    endpoints::OPENAI_DEFAULT.to_string()
}
fn default_summarizer_model() -> String {
    summarizer::DEFAULT_MODEL.to_string()
}
fn default_max_tokens() -> usize {
    summarizer::MAX_TOKENS
}
fn default_temperature() -> f32 {
    summarizer::TEMPERATURE
}
fn default_summarizer_timeout() -> u64 {
    summarizer::TIMEOUT_MS
}

impl SummarizerConfig {
    /// Configured key, else the first non-empty key from the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                summarizer::API_KEY_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|k| !k.trim().is_empty())
            })
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_summarizer_endpoint(),
            model: default_summarizer_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_summarizer_timeout(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (REALTY_CHAT prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env_name: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env_name)
}

/// Same as [`load_settings`] with an explicit config directory
pub fn load_settings_from(config_dir: &Path, env_name: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::from(config_dir.join("default")).required(false));

    if let Some(name) = env_name {
        builder = builder.add_source(File::from(config_dir.join(name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(env::PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
