//! Input and output types of a generation call

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GenerationError, Result};

/// Gemini API key. Formatting never reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Everything needed for one generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub api_key: ApiKey,
    pub resume_text: String,
    pub job_title: String,
    pub job_description: String,
}

impl GenerationRequest {
    pub fn new(
        api_key: ApiKey,
        resume_text: impl Into<String>,
        job_title: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            resume_text: resume_text.into(),
            job_title: job_title.into(),
            job_description: job_description.into(),
        }
    }

    /// Reject the request if any field is empty after trimming
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_blank() {
            return Err(GenerationError::InvalidInput(
                "Please enter your Google Gemini API Key.".to_string(),
            ));
        }

        let missing: Vec<&str> = [
            ("resume", &self.resume_text),
            ("job title", &self.job_title),
            ("job description", &self.job_description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::InvalidInput(format!(
                "Please fill in all resume and job description fields (missing: {}).",
                missing.join(", ")
            )))
        }
    }
}

/// Structured answer decoded from the model text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "TAILORED_RESUME")]
    pub tailored_resume: String,

    #[serde(rename = "ATS_MATCH_SCORE")]
    pub ats_match_score: i64,

    #[serde(rename = "SCORE_REASONING")]
    pub score_reasoning: String,
}

impl GenerationResult {
    /// Score as shown to the user, e.g. `82%`
    pub fn score_display(&self) -> String {
        format!("{}%", self.ats_match_score)
    }
}

/// Exactly one result or exactly one failure
pub type GenerationOutcome = Result<GenerationResult>;

/// How to treat an ATS score outside 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicy {
    /// Out-of-range scores are a malformed response
    #[default]
    Strict,
    /// Any integer is accepted as-is
    Lenient,
}

impl ScorePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }

    pub(crate) fn check(self, result: &GenerationResult) -> Result<()> {
        match self {
            Self::Strict if !(0..=100).contains(&result.ats_match_score) => {
                Err(GenerationError::malformed(format!(
                    "ATS_MATCH_SCORE {} is outside 0-100",
                    result.ats_match_score
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn request(resume: &str, title: &str, description: &str) -> GenerationRequest {
        GenerationRequest::new(ApiKey::new("test-key"), resume, title, description)
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("AIza-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(<redacted>)");
        assert_eq!(key.to_string(), "<redacted>");
        assert!(!format!("{:?}", request("r", "t", "d")).contains("test-key"));
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(request("Resume", "Engineer", "Build things").validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let err = request("  ", "Engineer", "\n\t").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("resume, job description"));
    }

    #[test]
    fn test_validate_rejects_blank_api_key() {
        let req = GenerationRequest::new(ApiKey::new(" "), "r", "t", "d");
        let err = req.validate().unwrap_err();
        assert_eq!(
            err,
            GenerationError::InvalidInput("Please enter your Google Gemini API Key.".to_string())
        );
    }

    #[test]
    fn test_result_uses_wire_field_names() {
        let result = GenerationResult {
            tailored_resume: "X".to_string(),
            ats_match_score: 82,
            score_reasoning: "Good fit".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["TAILORED_RESUME"], "X");
        assert_eq!(json["ATS_MATCH_SCORE"], 82);
        assert_eq!(result.score_display(), "82%");
    }

    #[test]
    fn test_score_policy() {
        let mut result = GenerationResult {
            tailored_resume: "X".to_string(),
            ats_match_score: 100,
            score_reasoning: "r".to_string(),
        };
        assert!(ScorePolicy::Strict.check(&result).is_ok());

        result.ats_match_score = -1;
        assert!(ScorePolicy::Strict.check(&result).is_err());
        assert!(ScorePolicy::Lenient.check(&result).is_ok());

        assert_eq!(ScorePolicy::from_str("LENIENT"), Some(ScorePolicy::Lenient));
        assert_eq!(ScorePolicy::from_str("loose"), None);
    }
}
