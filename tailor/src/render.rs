//! Terminal output for generation outcomes

use anyhow::Result;
use generation_client::{ErrorKind, GenerationError, GenerationResult};

pub fn render_text(result: &GenerationResult) -> String {
    format!(
        "TAILORED RESUME\n---------------\n{}\n\nATS MATCH SCORE: {}\n\nSCORE REASONING\n---------------\n{}\n",
        result.tailored_resume.trim_end(),
        result.score_display(),
        result.score_reasoning.trim_end()
    )
}

pub fn render_json(result: &GenerationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Message shown to the user for a failed generation
pub fn error_message(err: &GenerationError) -> String {
    match err.kind() {
        ErrorKind::InvalidInput => err.to_string(),
        _ => format!(
            "Error: {}. Please check your API key, model name, and ensure the API supports JSON mode.",
            err.to_string().trim_end_matches('.')
        ),
    }
}
