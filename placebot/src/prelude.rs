//! Convenient re-exports of the commonly used types.

pub use crate::assistant::{Assistant, AssistantSettings};
pub use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason, Usage};
pub use crate::dataset::{Dataset, DatasetStore, DirectoryStore};
pub use crate::error::{Error, LlmError, Result, ValidationError};
pub use crate::llms::{OpenAI, OpenAIConfig};
pub use crate::message::{Message, Role};
pub use crate::session::Session;
pub use crate::venue::{Category, ParkingVenue, SushiVenue, Venue};
