use thiserror::Error;

/// Category of a failed generation, as reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    TransportError,
    ApiError,
    MalformedResponse,
}

/// Failure of a single `generate` call. Every variant is terminal for that call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Gemini API response was empty or malformed")]
    MalformedResponse { detail: String },
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Transport(_) => ErrorKind::TransportError,
            Self::Api { .. } => ErrorKind::ApiError,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Error for a non-success status, with the provider's message when it gave one
    pub(crate) fn api(status_code: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("API request failed with status {}", status_code));
        Self::Api {
            message,
            status_code: Some(status_code),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL in its display text
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(message)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("HOME not set")]
    HomeNotSet,

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("No clipboard tool found. Install one of: {0}")]
    Unavailable(String),

    #[error("Failed to run clipboard tool {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard tool {program} failed{}", .status.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    Failed { program: String, status: Option<i32> },
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_provider_message() {
        let err = GenerationError::api(403, Some("bad key".to_string()));
        assert_eq!(err.to_string(), "bad key");
        assert_eq!(err.kind(), ErrorKind::ApiError);
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        let err = GenerationError::api(500, None);
        assert_eq!(err.to_string(), "API request failed with status 500");

        let blank = GenerationError::api(429, Some("  ".to_string()));
        assert_eq!(blank.to_string(), "API request failed with status 429");
    }

    #[test]
    fn test_malformed_message_is_fixed() {
        let err = GenerationError::malformed("missing field `ATS_MATCH_SCORE`");
        assert_eq!(err.to_string(), "Gemini API response was empty or malformed");
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_clipboard_failed_display() {
        let err = ClipboardError::Failed {
            program: "xclip".to_string(),
            status: Some(1),
        };
        assert_eq!(err.to_string(), "Clipboard tool xclip failed (exit code 1)");

        let killed = ClipboardError::Failed {
            program: "wl-copy".to_string(),
            status: None,
        };
        assert_eq!(killed.to_string(), "Clipboard tool wl-copy failed");
    }
}
