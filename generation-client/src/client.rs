//! Resume tailoring over a generation provider
//!
//! One `generate` call is one provider request: validate, build the prompt,
//! send it, then decode the model text as a second JSON pass.

use log::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, GenerationError};
use crate::prompt::build_prompt;
use crate::provider::{CompletionRequest, GenerationProvider};
use crate::providers::GeminiProvider;
use crate::request::{GenerationOutcome, GenerationRequest, GenerationResult, ScorePolicy};

pub struct GenerationClient {
    provider: Box<dyn GenerationProvider>,
    score_policy: ScorePolicy,
}

impl GenerationClient {
    pub fn new(provider: Box<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            score_policy: ScorePolicy::default(),
        }
    }

    /// Build a Gemini-backed client from configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let provider =
            GeminiProvider::with_base_url(&config.model, &config.base_url, config.timeout())?;
        Ok(Self::new(Box::new(provider)).with_score_policy(config.score_policy))
    }

    pub fn with_score_policy(mut self, score_policy: ScorePolicy) -> Self {
        self.score_policy = score_policy;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Turn a request into a tailored resume, score and reasoning
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        request.validate()?;

        let prompt = build_prompt(request);

        let response = self
            .provider
            .complete(CompletionRequest {
                prompt,
                api_key: request.api_key.clone(),
            })
            .await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Tokens: {} in, {} out ({})",
                usage.input_tokens, usage.output_tokens, response.model
            );
        }

        let result = parse_result(&response.content)?;
        self.score_policy.check(&result)?;
        Ok(result)
    }
}

/// Decode the model text into a result
pub fn parse_result(text: &str) -> GenerationOutcome {
    serde_json::from_str::<GenerationResult>(text).map_err(|e| {
        warn!("Model output did not match the response schema: {}", e);
        GenerationError::malformed(format!("invalid model output: {}", e))
    })
}
