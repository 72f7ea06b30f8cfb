//! Translation Gateway - Chinese-to-English translation with keyword extraction
//!
//! This library forwards Chinese text to a chat-completion model, decodes the
//! model's JSON reply, and serves the result over an HTTP API.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::TranslationGateway,
    config::GatewayConfig,
    errors::GatewayError,
    models::{TranslationRequest, TranslationResult},
    response::{parse_translation_content, strip_code_fence},
};

pub use server::api::{build_router, AppState};
