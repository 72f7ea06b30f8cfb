//! Custom error types for gateway operations

use thiserror::Error;

/// Errors raised by a single translation call
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Input text rejected before any upstream call
    #[error("{message}")]
    Validation {
        message: String,
    },

    /// Upstream credential or other required setting missing
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
    },

    /// Upstream answered with a non-2xx status
    #[error("Upstream API call failed: {body}")]
    Upstream {
        status: u16,
        body: String,
    },

    /// Model output could not be decoded into a result
    #[error("Failed to parse the result format returned by the model")]
    Parse {
        message: String,
    },

    /// Upstream call exceeded the configured timeout
    #[error("Translation service error: upstream request timed out after {timeout_ms} ms")]
    Timeout {
        timeout_ms: u64,
    },

    /// Anything else that went wrong during the call
    #[error("Translation service error: {message}")]
    Unknown {
        message: String,
    },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        GatewayError::Parse {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        GatewayError::Unknown {
            message: message.into(),
        }
    }

    /// HTTP status code the inbound API answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation { .. } => 400,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Configuration { .. }
            | GatewayError::Parse { .. }
            | GatewayError::Timeout { .. }
            | GatewayError::Unknown { .. } => 500,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::parse(err.to_string())
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::unknown(err.to_string())
    }
}

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
