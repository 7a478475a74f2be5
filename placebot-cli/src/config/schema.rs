//! Configuration schema definitions.

use placebot::prelude::{AssistantSettings, OpenAIConfig};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Completion service settings.
    pub openai: OpenAISection,

    /// Input limits of the assistant.
    #[serde(default)]
    pub assistant: AssistantSection,
}

/// The `[openai]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAISection {
    /// Model for the first attempt.
    pub model: String,
    /// Token limit for every completion.
    pub max_tokens: u32,
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Model for the repair pass, defaults to `model`.
    #[serde(default)]
    pub repair_model: Option<String>,
}

/// The `[assistant]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantSection {
    /// Longest accepted question, in characters.
    #[serde(default = "default_max_question_chars")]
    pub max_question_chars: usize,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            max_question_chars: default_max_question_chars(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    OpenAIConfig::DEFAULT_TIMEOUT_SECS
}

const fn default_max_question_chars() -> usize {
    AssistantSettings::DEFAULT_MAX_QUESTION_CHARS
}

impl AppConfig {
    /// Client configuration for the given credential.
    #[must_use]
    pub fn client_config(&self, api_key: impl Into<String>) -> OpenAIConfig {
        let mut config = OpenAIConfig::new(api_key)
            .with_model(&self.openai.model)
            .with_timeout(self.openai.timeout_secs);
        if let Some(ref base_url) = self.openai.base_url {
            config = config.with_base_url(base_url);
        }
        config
    }

    /// Settings for the conversation driver.
    #[must_use]
    pub fn assistant_settings(&self) -> AssistantSettings {
        let mut settings = AssistantSettings::new(&self.openai.model)
            .with_max_tokens(self.openai.max_tokens)
            .with_max_question_chars(self.assistant.max_question_chars);
        if let Some(ref model) = self.openai.repair_model {
            settings = settings.with_repair_model(model);
        }
        settings
    }
}
