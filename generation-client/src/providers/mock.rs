//! Mock generation provider for testing
//!
//! Returns canned model text or a canned error and records what it was asked.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{GenerationError, Result};
use crate::provider::{CompletionRequest, CompletionResponse, GenerationProvider};

pub struct MockProvider {
    /// Text or error handed back on every call
    outcome: std::result::Result<String, GenerationError>,
    /// Current call count
    call_count: AtomicUsize,
    /// Prompt of the most recent call
    last_prompt: Mutex<Option<String>>,
    /// Provider name for display
    name: &'static str,
}

impl MockProvider {
    /// Create a provider that always returns the given model text
    pub fn always_succeeds(content: &str) -> Self {
        Self::with_outcome(Ok(content.to_string()))
    }

    /// Create a provider that always fails with the given error
    pub fn always_fails(error: GenerationError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: std::result::Result<String, GenerationError>) -> Self {
        Self {
            outcome,
            call_count: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            name: "mock",
        }
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent complete() call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Set a custom provider name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.prompt);

        let content = self.outcome.clone()?;
        Ok(CompletionResponse {
            content,
            model: "mock-model".to_string(),
            usage: None,
        })
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ApiKey;

    fn request() -> CompletionRequest {
        CompletionRequest {
            prompt: "test".to_string(),
            api_key: ApiKey::new("key"),
        }
    }

    #[tokio::test]
    async fn test_always_succeeds() {
        let provider = MockProvider::always_succeeds("success");

        let result = provider.complete(request()).await;
        assert_eq!(result.unwrap().content, "success");
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_prompt().as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_always_fails() {
        let provider = MockProvider::always_fails(GenerationError::Transport(
            "connection refused".to_string(),
        ))
        .with_name("offline");

        for _ in 0..3 {
            let result = provider.complete(request()).await;
            assert!(matches!(result, Err(GenerationError::Transport(_))));
        }
        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.name(), "offline");
    }
}
