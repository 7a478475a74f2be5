//! The conversation driver.
//!
//! [`Assistant::answer`] turns one question into one validated [`Venue`]:
//!
//! 1. render the format instructions for the category's schema
//! 2. fill the question prompt and send it as a single user message
//! 3. parse the completion strictly
//! 4. on failure, send one repair request and parse again
//!
//! A failed repair ends in [`Error::NoUsableAnswer`]; there is no third
//! attempt. Service errors are returned as-is and never retried.

use tracing::{debug, info, warn};

use crate::chat::{ChatProvider, ChatRequest};
use crate::dataset::Dataset;
use crate::error::{Error, Result, ValidationError};
use crate::output;
use crate::prompts::PromptRender;
use crate::schema;
use crate::venue::{Category, Venue};

/// Model and input limits used by the [`Assistant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSettings {
    /// Model for the first attempt. Empty means the provider default.
    pub model: String,
    /// Token limit for every completion.
    pub max_tokens: u32,
    /// Model for the repair pass. `None` reuses [`Self::model`].
    pub repair_model: Option<String>,
    /// Longest accepted question, in characters.
    pub max_question_chars: usize,
}

impl AssistantSettings {
    /// Default token limit.
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
    /// Default question length limit.
    pub const DEFAULT_MAX_QUESTION_CHARS: usize = 2000;

    /// Creates settings for the given model with default limits.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Sets the token limit.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Uses a different model for the repair pass.
    #[must_use]
    pub fn with_repair_model(mut self, model: impl Into<String>) -> Self {
        self.repair_model = Some(model.into());
        self
    }

    /// Sets the question length limit.
    #[must_use]
    pub const fn with_max_question_chars(mut self, max: usize) -> Self {
        self.max_question_chars = max;
        self
    }

    /// The model used by the repair pass.
    #[must_use]
    pub fn repair_model(&self) -> &str {
        self.repair_model.as_deref().unwrap_or(&self.model)
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            repair_model: None,
            max_question_chars: Self::DEFAULT_MAX_QUESTION_CHARS,
        }
    }
}

/// Answers questions about a dataset through a completion service.
#[derive(Debug)]
pub struct Assistant<P> {
    provider: P,
    settings: AssistantSettings,
    prompts: PromptRender,
}

impl<P: ChatProvider> Assistant<P> {
    /// Create an assistant backed by `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if the built-in templates fail to compile.
    pub fn new(provider: P, settings: AssistantSettings) -> Result<Self> {
        Ok(Self {
            provider,
            settings,
            prompts: PromptRender::new()?,
        })
    }

    /// The active settings.
    #[must_use]
    pub const fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    /// The underlying completion service.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Answer `question` about `dataset` with a record of `category`'s schema.
    ///
    /// # Errors
    ///
    /// - [`Error::QuestionTooLong`] before any request is sent
    /// - [`Error::Llm`] / [`Error::Http`] if the completion service fails
    /// - [`Error::NoUsableAnswer`] if neither the answer nor its repair validates
    pub async fn answer(
        &self,
        category: Category,
        dataset: &Dataset,
        question: &str,
    ) -> Result<Venue> {
        self.check_question(question)?;

        let instructions = schema::format_instructions(category);
        let source_data = dataset.to_prompt_json()?;
        let prompt = self
            .prompts
            .render_question(question, &source_data, &instructions)?;
        debug!(%category, prompt_chars = prompt.len(), "asking question");

        let completion = self.complete(&self.settings.model, prompt).await?;

        match output::parse_venue(category, &completion) {
            Ok(venue) => Ok(venue),
            Err(failure) => {
                warn!(%category, error = %failure, "answer failed validation, attempting repair");
                self.repair(category, &instructions, &failure).await
            }
        }
    }

    /// Ask the model to reformat a completion that failed validation.
    async fn repair(
        &self,
        category: Category,
        instructions: &str,
        failure: &ValidationError,
    ) -> Result<Venue> {
        let prompt = self
            .prompts
            .render_repair(instructions, &failure.completion, &failure.message)?;
        let completion = self.complete(self.settings.repair_model(), prompt).await?;

        let venue = output::parse_venue(category, &completion).map_err(|e| {
            warn!(%category, error = %e, "repaired answer failed validation");
            Error::NoUsableAnswer(e)
        })?;
        info!(%category, title = venue.title(), "repaired answer validated");
        Ok(venue)
    }

    async fn complete(&self, model: &str, prompt: String) -> Result<String> {
        let request = ChatRequest::new(model)
            .user(prompt)
            .max_tokens(self.settings.max_tokens);

        let response = self.provider.chat(&request).await?;
        if response.is_truncated() {
            warn!(
                provider = self.provider.provider_name(),
                max_tokens = self.settings.max_tokens,
                "completion stopped at the token limit"
            );
        }

        Ok(response.text().unwrap_or_default().to_owned())
    }

    fn check_question(&self, question: &str) -> Result<()> {
        let len = question.chars().count();
        let max = self.settings.max_question_chars;
        if len > max {
            return Err(Error::QuestionTooLong { len, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_model_defaults_to_primary() {
        let settings = AssistantSettings::new("gpt-4o");
        assert_eq!(settings.repair_model(), "gpt-4o");

        let settings = settings.with_repair_model("gpt-4o-mini");
        assert_eq!(settings.repair_model(), "gpt-4o-mini");
        assert_eq!(settings.model, "gpt-4o");
    }

    #[test]
    fn test_default_limits() {
        let settings = AssistantSettings::default();
        assert_eq!(settings.max_tokens, 1024);
        assert_eq!(settings.max_question_chars, 2000);
    }
}
