//! Mock AI Provider for testing and keyless local runs.
//!
//! Configurable to return scripted responses in order, inject errors,
//! and record every prompt for verification.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAiProvider::new()
//!     .with_response("Hello, I'm Dr. Maya.");
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(response.content, "Hello, I'm Dr. Maya.");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// A scripted mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Mock error kinds for failure-path testing.
#[derive(Debug, Clone)]
pub enum MockError {
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Unavailable { message } => AiError::unavailable(message),
            MockError::AuthenticationFailed => AiError::AuthenticationFailed,
            MockError::Network { message } => AiError::network(message),
            MockError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
        }
    }
}

/// Mock AI provider with scripted responses.
#[derive(Debug, Clone)]
pub struct MockAiProvider {
    /// Scripted responses, consumed in order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Prompt history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    info: ProviderInfo,
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAiProvider {
    /// Creates a mock provider with an empty script.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
        }
    }

    /// Adds a successful response to the script.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error to the script.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Shorthand for a provider that always fails.
    pub fn failing() -> Self {
        Self::new().with_error(MockError::Unavailable {
            message: "Simulated provider failure".to_string(),
        })
    }

    /// Returns the number of completions requested.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the recorded prompts.
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    /// Next scripted response, replaying the last error forever once
    /// the script runs out on a failing provider.
    fn next_response(&self) -> MockResponse {
        let mut responses = self.responses.lock().unwrap();
        match responses.pop_front() {
            Some(MockResponse::Error(err)) if responses.is_empty() => {
                // Keep failing after the script is exhausted so a
                // "failing" provider stays failed across retries.
                responses.push_back(MockResponse::Error(err.clone()));
                MockResponse::Error(err)
            }
            Some(response) => response,
            None => MockResponse::Success("Mock response".to_string()),
        }
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        match self.next_response() {
            MockResponse::Success(content) => {
                Ok(CompletionResponse::new(content, &self.info.model))
            }
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_scripted_responses_in_order() {
        let provider = MockAiProvider::new()
            .with_response("First")
            .with_response("Second");

        let r1 = provider.complete(CompletionRequest::new("a")).await.unwrap();
        let r2 = provider.complete(CompletionRequest::new("b")).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
    }

    #[tokio::test]
    async fn returns_default_after_script_exhausted() {
        let provider = MockAiProvider::new().with_response("Only one");

        provider.complete(CompletionRequest::new("a")).await.unwrap();
        let r2 = provider.complete(CompletionRequest::new("b")).await.unwrap();

        assert_eq!(r2.content, "Mock response");
    }

    #[tokio::test]
    async fn failing_provider_fails_every_call() {
        let provider = MockAiProvider::failing();

        for _ in 0..3 {
            let result = provider.complete(CompletionRequest::new("x")).await;
            assert!(matches!(result, Err(AiError::Unavailable { .. })));
        }
    }

    #[tokio::test]
    async fn records_prompts() {
        let provider = MockAiProvider::new();

        provider
            .complete(CompletionRequest::new("first prompt"))
            .await
            .unwrap();
        provider
            .complete(CompletionRequest::new("second prompt"))
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["first prompt", "second prompt"]);
    }

    #[tokio::test]
    async fn scripted_errors_map_to_ai_errors() {
        let provider = MockAiProvider::new()
            .with_error(MockError::Timeout { timeout_secs: 30 })
            .with_response("recovered");

        let err = provider
            .complete(CompletionRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Timeout { timeout_secs: 30 }));

        let ok = provider.complete(CompletionRequest::new("y")).await.unwrap();
        assert_eq!(ok.content, "recovered");
    }
}
