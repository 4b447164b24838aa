//! # daybrief Core
//!
//! Domain types, traits, and error definitions for the daybrief personal
//! assistant. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (calendar, notes, weather, task store, LLM
//! endpoint) is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Explicitly constructed, injected provider handles (no global clients)
//! - Easy testing with scripted mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod capability;
pub mod completion;
pub mod error;
pub mod provider;
pub mod record;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use capability::{CapabilityMap, CapabilityStatus, ProviderKind};
pub use completion::{ChatMessage, ChatRole, CompletionClient, CompletionRequest, CompletionResponse};
pub use error::{Error, ProviderError, Result, StoreError, TemplateError};
pub use provider::{CalendarProvider, NotesProvider, WeatherProvider};
pub use record::{
    Briefing, Event, EventPatch, NewEvent, NewNote, Note, NotePatch, Todo, WeatherReport,
};
pub use store::TaskStore;
