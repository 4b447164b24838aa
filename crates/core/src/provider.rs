//! Provider traits — the abstraction over the three external services.
//!
//! Each provider is an out-of-process collaborator reached over the
//! network. The traits share a capability shape (fetch/create/update/
//! delete) but concrete providers differ in what they support: weather is
//! fetch-only. There is no caching layer; every call re-queries the
//! provider.
//!
//! Implementations live in `daybrief-providers`; handles are constructed
//! explicitly at startup and injected into the context assembler.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ProviderError;
use crate::record::{Event, EventPatch, NewEvent, NewNote, Note, NotePatch, WeatherReport};

/// Calendar events: full CRUD.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Fetch all events on the given date, ordered by start time.
    async fn events_for(&self, date: NaiveDate) -> Result<Vec<Event>, ProviderError>;

    /// Create an event; returns the provider-assigned id.
    ///
    /// Fails with `Validation` if the title is empty, before any network
    /// round trip.
    async fn create_event(&self, event: NewEvent) -> Result<String, ProviderError>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<(), ProviderError>;

    /// Delete an event. Fails with `NotFound` for unknown ids.
    async fn delete_event(&self, id: &str) -> Result<(), ProviderError>;
}

/// Notes: full CRUD.
#[async_trait]
pub trait NotesProvider: Send + Sync {
    /// Fetch all notes dated on the given date.
    async fn notes_for(&self, date: NaiveDate) -> Result<Vec<Note>, ProviderError>;

    /// Create a note; returns the provider-assigned id.
    ///
    /// Fails with `Validation` if the content is empty.
    async fn create_note(&self, note: NewNote) -> Result<String, ProviderError>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<(), ProviderError>;

    /// Delete a note. Fails with `NotFound` for unknown ids.
    async fn delete_note(&self, id: &str) -> Result<(), ProviderError>;
}

/// Weather: fetch only.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a location.
    async fn current(&self, location: &str) -> Result<WeatherReport, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The traits must stay object-safe: the assembler holds them as
    // `Arc<dyn ...>`.
    #[test]
    fn traits_are_object_safe() {
        fn _takes_calendar(_: &dyn CalendarProvider) {}
        fn _takes_notes(_: &dyn NotesProvider) {}
        fn _takes_weather(_: &dyn WeatherProvider) {}
    }
}
