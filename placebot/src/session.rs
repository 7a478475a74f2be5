//! The interactive question loop.
//!
//! [`Session::run`] drives the dialogue over any async line reader and
//! writer, so the binary passes stdin/stdout and tests pass byte buffers.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{error, info};

use crate::assistant::Assistant;
use crate::chat::ChatProvider;
use crate::dataset::DatasetStore;
use crate::error::{Error, Result};
use crate::venue::{Category, Venue};

const BANNER: &str = "============================== Simple Assistant ==============================";
const CATEGORY_PROMPT: &str =
    "Would you like to search for sushi or parking? (type 'quit' to exit): ";
const QUESTION_PROMPT: &str = "What would you like to ask about these places? ";
const QUIT: &str = "quit";

/// An interactive session over a dataset store and an assistant.
#[derive(Debug)]
pub struct Session<P, S> {
    assistant: Assistant<P>,
    store: S,
}

/// What the user chose at the category prompt.
enum Choice {
    Quit,
    Category(Category),
    Invalid,
}

impl Choice {
    fn parse(input: &str) -> Self {
        let token = input.trim().to_lowercase();
        if token == QUIT {
            return Self::Quit;
        }
        token.parse().map_or(Self::Invalid, Self::Category)
    }
}

impl<P: ChatProvider, S: DatasetStore> Session<P, S> {
    /// Create a session.
    #[must_use]
    pub const fn new(assistant: Assistant<P>, store: S) -> Self {
        Self { assistant, store }
    }

    /// The assistant answering questions.
    #[must_use]
    pub const fn assistant(&self) -> &Assistant<P> {
        &self.assistant
    }

    /// The dataset store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run the loop until the user quits or input ends.
    ///
    /// Errors tied to one question are reported and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns fatal errors (see [`Error::is_fatal`]), such as a missing or
    /// malformed dataset, and I/O errors on `input` or `output`.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        write_line(&mut output, BANNER).await?;

        loop {
            let Some(line) = prompt(&mut lines, &mut output, CATEGORY_PROMPT).await? else {
                info!("input closed, ending session");
                return Ok(());
            };

            let category = match Choice::parse(&line) {
                Choice::Quit => {
                    write_line(&mut output, "Goodbye!").await?;
                    return Ok(());
                }
                Choice::Invalid => {
                    write_line(&mut output, "Invalid input. Please enter 'sushi' or 'parking'.")
                        .await?;
                    continue;
                }
                Choice::Category(category) => category,
            };

            let dataset = self.store.load(category).await?;
            write_line(&mut output, &format!("Here are the nearby {category}s:")).await?;
            for title in dataset.titles() {
                write_line(&mut output, &format!("- {title}")).await?;
            }

            let Some(question) = prompt(&mut lines, &mut output, QUESTION_PROMPT).await? else {
                info!("input closed, ending session");
                return Ok(());
            };
            let question = question.trim();
            if question.is_empty() {
                write_line(&mut output, "No question asked.").await?;
                continue;
            }

            match self.assistant.answer(category, &dataset, question).await {
                Ok(venue) => write_answer(&mut output, &venue).await?,
                Err(e) if e.is_fatal() => return Err(e),
                Err(Error::NoUsableAnswer(e)) => {
                    error!(error = %e, "no usable answer");
                    write_line(
                        &mut output,
                        "ASSISTANT: Sorry, I could not produce a usable answer. Please try again.",
                    )
                    .await?;
                }
                Err(e) => {
                    error!(error = %e, "question failed");
                    write_line(&mut output, &format!("ASSISTANT: The request failed: {e}")).await?;
                }
            }
        }
    }
}

async fn prompt<R, W>(lines: &mut Lines<R>, output: &mut W, text: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(lines.next_line().await?)
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

async fn write_answer<W: AsyncWrite + Unpin>(output: &mut W, venue: &Venue) -> Result<()> {
    let body = serde_json::to_string_pretty(venue)?;
    write_line(output, &format!("ASSISTANT: {body}")).await
}
