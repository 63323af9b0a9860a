//! AI provider port.
//!
//! Abstracts the language model behind the therapist agent so handlers
//! can generate completions without coupling to a specific vendor API.
//!
//! # Design
//!
//! - Single-prompt completions; the conversational context is folded
//!   into the prompt text by the caller
//! - Error variants for the failure modes handlers branch on, with a
//!   retryable classification

use async_trait::async_trait;

/// Port for language model interactions.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a completion for a single prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The full prompt text.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request for a prompt with provider defaults.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Sets the output token cap.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, already trimmed.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

impl CompletionResponse {
    /// Creates a response, trimming surrounding whitespace from the
    /// generated text.
    pub fn new(content: impl AsRef<str>, model: impl Into<String>) -> Self {
        Self {
            content: content.as_ref().trim().to_string(),
            model: model.into(),
        }
    }
}

/// Provider identification.
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider name (e.g. "gemini", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Provider is unavailable or returned a server error.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AiError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiError::Unavailable { .. } | AiError::Network(_) | AiError::Timeout { .. }
        )
    }
}
