//! OpenAI API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};
use crate::message::Message;

use super::config::OpenAIConfig;
use super::types::{OpenAIChatRequest, OpenAIErrorResponse, OpenAIMessage};

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub(crate) config: Arc<OpenAIConfig>,
    pub(crate) client: Client,
}

impl OpenAI {
    /// Create a new OpenAI client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Auth`] if the API key is empty, or
    /// [`LlmError::Internal`] if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::auth("openai", "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| LlmError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build request headers for JSON requests.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
    }

    /// Convert Message to OpenAI format.
    pub(crate) fn convert_message(msg: &Message) -> OpenAIMessage {
        OpenAIMessage {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone().unwrap_or_default(),
        }
    }

    /// Build the request body.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> OpenAIChatRequest {
        let messages = request.messages.iter().map(Self::convert_message).collect();

        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };

        OpenAIChatRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
        }
    }

    /// Parse an error response from OpenAI.
    pub(crate) fn parse_error(status: u16, body: &str) -> LlmError {
        if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let error = error_response.error;
            let code = error.code.unwrap_or(error.error_type);

            return match status {
                401 => LlmError::auth("openai", error.message),
                429 => LlmError::rate_limited("openai"),
                _ => LlmError::provider_code("openai", code, error.message),
            };
        }

        LlmError::http_status(status, body.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAI {
        OpenAI::new(OpenAIConfig::new("test-key").with_model("gpt-4o-mini"))
            .expect("client should build")
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(OpenAI::new(OpenAIConfig::default()).is_err());
    }

    #[test]
    fn test_message_conversion() {
        let msg = Message::user("Hello!");
        let converted = OpenAI::convert_message(&msg);

        assert_eq!(converted.role, "user");
        assert_eq!(converted.content, "Hello!");
    }

    #[test]
    fn test_body_single_user_message() {
        let request = ChatRequest::new("").user("prompt text").max_tokens(512);
        let body = serde_json::to_value(client().build_body(&request))
            .expect("body should serialize");

        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "prompt text"}],
                "max_tokens": 512
            })
        );
    }

    #[test]
    fn test_request_headers() {
        let client = client();
        let request = client
            .build_request(&client.chat_url())
            .build()
            .expect("request should build");

        let headers = request.headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["authorization"], "Bearer test-key");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn test_body_model_override() {
        let request = ChatRequest::new("gpt-4o").user("x");
        assert_eq!(client().build_body(&request).model, "gpt-4o");
    }

    #[test]
    fn test_chat_url() {
        assert_eq!(
            client().chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_parse_error_status_mapping() {
        let body = r#"{"error": {"message": "bad key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;

        assert!(matches!(OpenAI::parse_error(401, body), LlmError::Auth { .. }));
        assert!(matches!(
            OpenAI::parse_error(429, body),
            LlmError::RateLimited { .. }
        ));
        assert!(matches!(
            OpenAI::parse_error(500, body),
            LlmError::Provider { code: Some(ref c), .. } if c == "invalid_api_key"
        ));
        assert!(matches!(
            OpenAI::parse_error(502, "<html>Bad gateway</html>"),
            LlmError::HttpStatus { status: 502, .. }
        ));
    }
}
