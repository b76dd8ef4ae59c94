//! LLM providers
//!
//! One-shot text completion against an external generative-language API.

mod http_utils;
/// Implementations of specific LLM providers
pub mod providers;

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// Error returned by the provider's API
    #[error("API error: {0}")]
    ApiError(String),
    /// Error during network communication
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Error during JSON serialization or deserialization
    #[error("JSON error: {0}")]
    JsonError(String),
    /// Missing provider configuration or API key
    #[error("Missing client/API key: {0}")]
    MissingConfig(String),
}

/// Interface for completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Turn a single prompt string into reply text
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError>;
}
