//! Error types for placebot.
//!
//! The hierarchy mirrors how a failure is handled by the interactive loop:
//! - [`LlmError`] and transport errors: reported, the session continues
//! - [`ValidationError`]: repaired once by the assistant, then surfaced as
//!   [`Error::NoUsableAnswer`]
//! - dataset and I/O errors: fatal for the run

use crate::prompts::RenderError;
use crate::venue::Category;

/// Result type alias for placebot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for placebot.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Completion service error.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Both the first answer and its repair failed validation.
    #[error("could not produce a usable answer: {0}")]
    NoUsableAnswer(ValidationError),

    /// The question exceeds the configured length limit.
    #[error("question is {len} characters long, the limit is {max}")]
    QuestionTooLong {
        /// Length of the rejected question, in characters.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A dataset is missing or malformed.
    #[error("failed to load {category} dataset: {message}")]
    Dataset {
        /// Category whose dataset failed to load.
        category: Category,
        /// What went wrong.
        message: String,
    },

    /// Prompt template error.
    #[error("Prompt error: {0}")]
    Prompt(#[from] RenderError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a dataset error.
    #[must_use]
    pub fn dataset(category: Category, message: impl Into<String>) -> Self {
        Self::Dataset {
            category,
            message: message.into(),
        }
    }

    /// Whether this error must end the session.
    ///
    /// Everything tied to a single question (service failures, unusable
    /// answers, oversized input) is recoverable; broken local data is not.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Dataset { .. } | Self::Prompt(_) | Self::Json(_) | Self::Io(_)
        )
    }
}

/// Error type for completion service operations.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    /// Authentication or authorization failure.
    #[error("[{provider}] {message}")]
    Auth {
        /// Provider name (e.g., "openai").
        provider: String,
        /// Error description.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("[{provider}] Rate limit exceeded. Please retry after some time.")]
    RateLimited {
        /// Provider name.
        provider: String,
    },

    /// Response format error.
    #[error("Expected {expected}, got {got}")]
    ResponseFormat {
        /// Expected format description.
        expected: String,
        /// Actual format received.
        got: String,
    },

    /// HTTP status error.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Provider-specific error.
    #[error("[{provider}] {message}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Error description.
        message: String,
        /// Optional error code from the provider.
        code: Option<String>,
    },

    /// Internal error.
    #[error("{0}")]
    Internal(String),
}

impl LlmError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a rate limit error.
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ResponseFormat {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a provider error with an error code.
    #[must_use]
    pub fn provider_code(
        provider: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// A completion that does not conform to the requested schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable parser message, including the failing field path.
    pub message: String,
    /// The raw completion text that failed to parse.
    pub completion: String,
}

impl ValidationError {
    /// Create a validation error for the given completion.
    #[must_use]
    pub fn new(message: impl Into<String>, completion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            completion: completion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::dataset(Category::Sushi, "missing").is_fatal());
        assert!(Error::Io(std::io::Error::other("disk")).is_fatal());

        assert!(!Error::Llm(LlmError::rate_limited("openai")).is_fatal());
        assert!(!Error::NoUsableAnswer(ValidationError::new("bad", "{}")).is_fatal());
        assert!(!Error::QuestionTooLong { len: 10, max: 5 }.is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = Error::dataset(Category::Parking, "file not found");
        assert_eq!(
            err.to_string(),
            "failed to load parking dataset: file not found"
        );

        let err = LlmError::auth("openai", "invalid key");
        assert_eq!(err.to_string(), "[openai] invalid key");

        let err = Error::NoUsableAnswer(ValidationError::new("missing field `title`", ""));
        assert!(err.to_string().contains("could not produce a usable answer"));
    }
}
