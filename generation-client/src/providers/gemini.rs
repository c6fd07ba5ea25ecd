//! Google Gemini provider
//!
//! Direct HTTP implementation of the `generateContent` endpoint with a
//! JSON response schema.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

use crate::error::{GenerationError, Result};
use crate::provider::{CompletionRequest, CompletionResponse, GenerationProvider, TokenUsage};

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Provider for direct Gemini API calls
pub struct GeminiProvider {
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint
    pub fn new(model: &str, timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        Self::with_base_url(model, GEMINI_API_URL, timeout)
    }

    /// Create a provider against a custom base URL
    pub fn with_base_url(
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Schema the model output must conform to
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "TAILORED_RESUME": { "type": "string" },
            "ATS_MATCH_SCORE": { "type": "integer" },
            "SCORE_REASONING": { "type": "string" }
        },
        "required": ["TAILORED_RESUME", "ATS_MATCH_SCORE", "SCORE_REASONING"]
    })
}

// Gemini API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if non-blank
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Why there is no usable text, for diagnostics
    fn missing_text_detail(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {}", reason);
        }
        match self.candidates.first() {
            None => "response has no candidates".to_string(),
            Some(Candidate {
                finish_reason: Some(reason),
                ..
            }) => format!("candidate has no text (finish reason: {})", reason),
            Some(_) => "candidate has no text".to_string(),
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        debug!(
            "Sending generateContent request (model: {}, prompt: {} bytes)",
            self.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, request.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message);
            warn!("Gemini API returned {}", status);
            return Err(GenerationError::api(status.as_u16(), message));
        }

        let api_response: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::malformed(format!("invalid response body: {}", e)))?;

        let content = api_response
            .first_text()
            .ok_or_else(|| GenerationError::malformed(api_response.missing_text_detail()))?
            .to_string();

        let usage = api_response.usage_metadata.map(|u| TokenUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            usage,
        })
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::with_base_url(
            "gemini-2.5-flash",
            "http://localhost:9/v1beta/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["TAILORED_RESUME", "ATS_MATCH_SCORE", "SCORE_REASONING"])
        );
    }

    #[test]
    fn test_first_text() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"{}"},{"text":"ignored"}]}}]}"#,
        );
        assert_eq!(response.first_text(), Some("{}"));
    }

    #[test]
    fn test_missing_text_detail() {
        let blocked = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert_eq!(blocked.first_text(), None);
        assert_eq!(blocked.missing_text_detail(), "prompt blocked: SAFETY");

        let truncated = parse(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#);
        assert_eq!(
            truncated.missing_text_detail(),
            "candidate has no text (finish reason: MAX_TOKENS)"
        );

        let blank = parse(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#);
        assert_eq!(blank.first_text(), None);
        assert_eq!(blank.missing_text_detail(), "candidate has no text");
    }
}
