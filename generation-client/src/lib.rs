//! Resume tailoring client for the Google Gemini API
//!
//! Builds a fixed prompt from a resume, job title and job description,
//! requests a schema-constrained JSON answer and decodes it into a
//! tailored resume, an ATS match score and the reasoning behind it.

pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod request;

pub use client::{GenerationClient, parse_result};
pub use clipboard::{Clipboard, MockClipboard, SystemClipboard};
pub use config::{API_KEY_ENV, Config};
pub use error::{ClipboardError, ConfigError, ErrorKind, GenerationError, Result};
pub use prompt::build_prompt;
pub use provider::{CompletionRequest, CompletionResponse, GenerationProvider, TokenUsage};
pub use providers::{GeminiProvider, MockProvider};
pub use request::{ApiKey, GenerationOutcome, GenerationRequest, GenerationResult, ScorePolicy};
