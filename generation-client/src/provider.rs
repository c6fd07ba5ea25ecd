use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::request::ApiKey;

/// Prompt to send to a generation provider
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub api_key: ApiKey,
}

/// Raw model text returned by a provider, before the result is decoded
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Trait for generation providers
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Execute a single schema-constrained completion. Never retries.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<P: GenerationProvider + ?Sized> GenerationProvider for Arc<P> {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        (**self).complete(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
