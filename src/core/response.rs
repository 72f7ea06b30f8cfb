//! Cleanup and decoding of the model's reply

use serde_json::Value;

use crate::core::errors::{GatewayError, Result};
use crate::core::models::TranslationResult;
use crate::core::prompt::KEYWORD_COUNT;

/// Strip one leading and one trailing markdown code fence.
///
/// Only a single opener (a bare fence or one tagged `json`) and a single
/// closer are removed. Anything else is left for the JSON decoder to reject.
pub fn strip_code_fence(content: &str) -> &str {
    let mut content = content.trim();

    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    }
    if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }

    content.trim()
}

/// Decode the model's message content into a result
pub fn parse_translation_content(content: &str) -> Result<TranslationResult> {
    let value: Value = serde_json::from_str(strip_code_fence(content))?;

    let object = value
        .as_object()
        .ok_or_else(|| GatewayError::parse("model reply is not a JSON object"))?;

    let translation = match object.get("translation") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(GatewayError::parse(format!(
                "translation must be a string, got {}",
                other
            )))
        }
    };

    let keywords = match object.get("keywords") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .take(KEYWORD_COUNT)
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    GatewayError::parse(format!("keyword must be a string, got {}", item))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(GatewayError::parse(format!(
                "keywords must be an array, got {}",
                other
            )))
        }
    };

    Ok(TranslationResult {
        translation,
        keywords,
    })
}
