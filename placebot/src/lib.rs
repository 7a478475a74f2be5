//! Placebot - ask an LLM about nearby sushi restaurants and parking.
//!
//! The crate loads a fixed set of venues, builds a single prompt from a
//! question, the venue data and the expected answer schema, and validates
//! the model's reply into a typed [`Venue`]. A reply that fails validation
//! gets exactly one repair attempt.
//!
//! # Example
//!
//! ```rust,ignore
//! use placebot::prelude::*;
//!
//! let key = std::env::var("OPENAI_API_KEY")?;
//! let provider = OpenAI::new(OpenAIConfig::new(key).with_model("gpt-4o-mini"))?;
//! let assistant = Assistant::new(provider, AssistantSettings::new("gpt-4o-mini"))?;
//! let dataset = DirectoryStore::default().load(Category::Sushi).await?;
//!
//! let venue = assistant
//!     .answer(Category::Sushi, &dataset, "Which place has the best reviews?")
//!     .await?;
//! println!("{}", venue.title());
//! ```

pub mod assistant;
pub mod chat;
pub mod dataset;
pub mod error;
pub mod llms;
pub mod message;
pub mod output;
pub mod prelude;
pub mod prompts;
pub mod schema;
pub mod session;
pub mod venue;

pub use error::{Error, LlmError, Result, ValidationError};
pub use venue::{Category, Venue};
