//! Prompt templates and rendering.
//!
//! Two fixed templates exist: the question prompt sent on the first attempt
//! and the repair prompt sent when the first answer fails validation. Both
//! are rendered with minijinja. Substituted values are inserted verbatim and
//! are never themselves interpreted as template syntax.

use minijinja::{Environment, UndefinedBehavior, context};

const QUESTION_TEMPLATE_NAME: &str = "question.txt";
const REPAIR_TEMPLATE_NAME: &str = "repair.txt";

/// Prompt asking the model to answer a question from the source data.
pub const QUESTION_TEMPLATE: &str = r"
According to the provided information in JSON format as your source data related to a few places in Munich, please answer the question straight without providing any additional information.

Source data section will start with <source_data> and ends with </source_data>
Format instructions section will start with <format_instructions> and ends with </format_instructions>
Question section will start with <question> and ends with </question>

<source_data>
{{ source_data }}
</source_data>

<format_instructions>
{{ format_instructions }}
</format_instructions>

<question>
{{ question }}
</question>

answer:
";

/// Prompt asking the model to reformat a completion that failed validation.
pub const REPAIR_TEMPLATE: &str = r"Instructions:
--------------
{{ instructions }}
--------------
Completion:
--------------
{{ completion }}
--------------

Above, the Completion did not satisfy the constraints given in the Instructions.
Error:
--------------
{{ error }}
--------------

Please try again. Please only respond with an answer that satisfies the constraints laid out in the Instructions:";

/// Error type for template rendering operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// Template parsing/compilation error.
    #[error("Template error: {0}")]
    Template(String),
    /// Runtime rendering error.
    #[error("Render error: {0}")]
    Render(String),
}

/// Renders the assistant's prompts.
#[derive(Debug)]
pub struct PromptRender {
    env: Environment<'static>,
}

impl PromptRender {
    /// Create a renderer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if a built-in template fails to compile.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(false);
        env.set_lstrip_blocks(false);

        env.add_template(QUESTION_TEMPLATE_NAME, QUESTION_TEMPLATE)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        env.add_template(REPAIR_TEMPLATE_NAME, REPAIR_TEMPLATE)
            .map_err(|e| RenderError::Template(e.to_string()))?;

        Ok(Self { env })
    }

    /// Render the question prompt.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Render`] if rendering fails.
    pub fn render_question(
        &self,
        question: &str,
        source_data: &str,
        format_instructions: &str,
    ) -> Result<String, RenderError> {
        self.render(
            QUESTION_TEMPLATE_NAME,
            context! {
                question => question,
                source_data => source_data,
                format_instructions => format_instructions,
            },
        )
    }

    /// Render the repair prompt for a completion that failed validation.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Render`] if rendering fails.
    pub fn render_repair(
        &self,
        instructions: &str,
        completion: &str,
        error: &str,
    ) -> Result<String, RenderError> {
        self.render(
            REPAIR_TEMPLATE_NAME,
            context! {
                instructions => instructions,
                completion => completion,
                error => error,
            },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, RenderError> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|e| RenderError::Template(e.to_string()))?;

        tmpl.render(ctx)
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

/// Render the question prompt with the built-in template.
///
/// # Errors
///
/// Returns a [`RenderError`] if the template fails to compile or render.
pub fn render_question_prompt(
    question: &str,
    source_data: &str,
    format_instructions: &str,
) -> Result<String, RenderError> {
    PromptRender::new()?.render_question(question, source_data, format_instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_contains_all_sections() {
        let question = "What time does X close?";
        let data = r#"[{"title":"X","address":"Marienplatz 1"}]"#;
        let instructions = r#"{"properties": {"title": {"type": "string"}}}"#;

        let prompt = render_question_prompt(question, data, instructions).unwrap();

        assert!(prompt.contains(question));
        assert!(prompt.contains(data));
        assert!(prompt.contains(instructions));
        assert!(prompt.contains(&format!("<question>\n{question}\n</question>")));
        assert!(prompt.contains(&format!("<source_data>\n{data}\n</source_data>")));
    }

    #[test]
    fn test_question_prompt_delimiters_are_paired() {
        let prompt = render_question_prompt("q", "d", "f").unwrap();

        for tag in ["source_data", "format_instructions", "question"] {
            assert!(prompt.contains(&format!("<{tag}>\n")), "missing <{tag}>");
            assert!(prompt.contains(&format!("</{tag}>")), "missing </{tag}>");
        }
        assert!(!prompt.contains("<source data>"));
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        let question = "Is {{ source_data }} literal? {% if true %}yes{% endif %}";
        let prompt = render_question_prompt(question, "DATA", "FMT").unwrap();

        assert!(prompt.contains(question));
        assert_eq!(prompt.matches("DATA").count(), 1);
    }

    #[test]
    fn test_long_values_not_truncated() {
        let data = "x".repeat(100_000);
        let prompt = render_question_prompt("q", &data, "f").unwrap();
        assert!(prompt.contains(&data));
    }

    #[test]
    fn test_repair_prompt() {
        let render = PromptRender::new().unwrap();
        let prompt = render
            .render_repair("FORMAT", "{\"address\": 1}", "missing field `title`")
            .unwrap();

        assert!(prompt.starts_with("Instructions:"));
        assert!(prompt.contains("FORMAT"));
        assert!(prompt.contains("{\"address\": 1}"));
        assert!(prompt.contains("missing field `title`"));
    }
}
