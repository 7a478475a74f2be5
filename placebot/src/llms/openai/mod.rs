//! OpenAI API client implementation.
//!
//! Only non-streaming chat completions are needed: one request per
//! question, plus at most one repair request.

mod chat;
mod client;
mod config;
mod types;

pub use client::OpenAI;
pub use config::OpenAIConfig;
