//! Prompt construction for the upstream chat-completion call

use crate::core::config::GatewayConfig;
use crate::core::models::{ChatMessage, UpstreamPayload};

/// Fixed role of the assistant
pub const SYSTEM_PROMPT: &str = "You are a professional translation assistant who excels at \
Chinese-to-English translation and keyword extraction. Always respond with valid JSON.";

/// Number of keywords the model is asked for
pub const KEYWORD_COUNT: usize = 3;

/// Build the user message for the given text
pub fn build_user_prompt(text: &str) -> String {
    format!(
        "Translate the following Chinese text into English and extract the {count} most \
important keywords.\n\
\n\
Chinese text:\n\
{text}\n\
\n\
Return the result strictly in the following JSON format and add nothing else:\n\
{{\"translation\": \"English translation\", \"keywords\": [\"keyword1\", \"keyword2\", \"keyword3\"]}}\n",
        count = KEYWORD_COUNT,
        text = text,
    )
}

/// Build the full upstream request body
pub fn build_payload(config: &GatewayConfig, text: &str) -> UpstreamPayload {
    UpstreamPayload {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_prompt(text)),
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}
