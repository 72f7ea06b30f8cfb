//! Translation gateway: one upstream chat-completion call per request

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::GatewayConfig;
use crate::core::errors::{GatewayError, Result};
use crate::core::models::{ChatCompletionResponse, TranslationResult};
use crate::core::prompt::build_payload;
use crate::core::response::parse_translation_content;

/// Gateway between inbound translation requests and the upstream model
///
/// Holds only immutable configuration; concurrent calls are independent and
/// nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct TranslationGateway {
    client: reqwest::Client,
    config: Arc<GatewayConfig>,
}

impl TranslationGateway {
    /// Create a new gateway
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GatewayError::unknown(e.to_string()))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Check the input text against the length limits
    pub fn validate_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(GatewayError::validation("Text to translate must not be empty"));
        }

        if text.chars().count() > self.config.max_text_chars {
            return Err(GatewayError::validation(format!(
                "Text to translate is too long, limit it to {} characters",
                self.config.max_text_chars
            )));
        }

        Ok(())
    }

    /// Translate Chinese text to English and extract up to three keywords
    pub async fn translate(&self, text: &str) -> Result<TranslationResult> {
        self.validate_text(text)?;

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::Configuration {
                message: "DEEPSEEK_API_KEY is not configured, set it in api.env or .env"
                    .to_string(),
            })?;

        let content = self.send_request(api_key, text).await?;
        let result = parse_translation_content(&content).map_err(|e| {
            warn!("Unusable model reply: {:?}", e);
            e
        })?;

        info!(
            "Translated {} chars, {} keywords",
            text.chars().count(),
            result.keywords.len()
        );

        Ok(result)
    }

    /// Send the HTTP request and return the first choice's content
    async fn send_request(&self, api_key: &str, text: &str) -> Result<String> {
        let body = build_payload(&self.config, text);

        debug!(
            "Sending request to {} with model {}",
            self.config.api_endpoint, self.config.model
        );

        let response = self
            .client
            .post(&self.config.api_endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| self.map_transport_error(e))?;

            warn!("Upstream returned {}: {}", status, error_text);

            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let envelope: ChatCompletionResponse = serde_json::from_str(&raw)?;

        envelope
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| GatewayError::unknown("upstream reply has no choices[0].message.content"))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            warn!("Upstream request timed out after {} ms", self.config.timeout_ms);
            GatewayError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            warn!("Upstream request failed: {}", err);
            GatewayError::unknown(err.to_string())
        }
    }
}
