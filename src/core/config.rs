//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Default chat-completion endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default upstream model
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Sampling temperature sent with every request
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Token cap sent with every request
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Hard ceiling on the upstream call
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Maximum input length in characters
pub const DEFAULT_MAX_TEXT_CHARS: usize = 5000;

/// Configuration for the translation gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub max_text_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// A missing `DEEPSEEK_API_KEY` is not an error here; every translation
    /// call fails with a configuration error instead.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = api_key_from_env();

        if api_key.is_none() {
            warn!("DEEPSEEK_API_KEY is not set, translation requests will fail");
        }

        let api_endpoint = std::env::var("DEEPSEEK_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

        let model = std::env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()?;

        Ok(Self {
            api_key,
            api_endpoint,
            model,
            timeout_ms,
            ..Default::default()
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.api_key = config.api_key.filter(|key| !key.trim().is_empty());
        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from a JSON file if given, otherwise from the environment
    ///
    /// A file without an `api_key` still picks up `DEEPSEEK_API_KEY`.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Self::from_env();
        };

        let mut config = Self::from_file(path)?;
        if config.api_key.is_none() {
            config.api_key = api_key_from_env();
        }

        if config.api_key.is_none() {
            warn!("No API key in configuration file or DEEPSEEK_API_KEY, translation requests will fail");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the API key, ignoring blank values
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if !api_key.trim().is_empty() {
            self.api_key = Some(api_key);
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.model.is_empty() {
            return Err(anyhow::anyhow!("model is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.max_tokens == 0 {
            return Err(anyhow::anyhow!("max_tokens must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!("temperature must be between 0 and 2"));
        }

        if self.max_text_chars == 0 {
            return Err(anyhow::anyhow!("max_text_chars must be greater than 0"));
        }

        Ok(())
    }
}

fn api_key_from_env() -> Option<String> {
    std::env::var("DEEPSEEK_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}
