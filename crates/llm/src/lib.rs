//! LLM integration for daybrief.
//!
//! `chat` holds the OpenAI-compatible HTTP client; `invoker` wraps any
//! `CompletionClient` in the fail-soft boundary the interactive surface
//! relies on.

pub mod chat;
pub mod invoker;

pub use chat::OpenAiCompatClient;
pub use invoker::{CompletionInvoker, FALLBACK_REPLY};
