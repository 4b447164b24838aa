//! Context assembly.
//!
//! The assembler fans out to the three providers and the task store,
//! joins, and merges the results into a single snapshot. Any individual
//! failure is caught, recorded in the capability map, and replaced with
//! that field's safe default. Assembly itself never fails.

use std::sync::Arc;

use chrono::NaiveDate;
use daybrief_core::capability::{CapabilityMap, ProviderKind};
use daybrief_core::provider::{CalendarProvider, NotesProvider, WeatherProvider};
use daybrief_core::record::{Event, Note, Todo};
use daybrief_core::store::TaskStore;
use tracing::warn;

/// Sentinel used when the weather fetch fails.
pub const WEATHER_UNAVAILABLE: &str = "Weather information unavailable";

/// The merged snapshot of provider and store data for one prompt.
///
/// Every field is always present: failed sources contribute their default
/// and an error entry in `capabilities`.
#[derive(Debug, Clone)]
pub struct BriefingContext {
    pub date: NaiveDate,

    /// Rendered weather text, or [`WEATHER_UNAVAILABLE`].
    pub weather: String,

    /// Today's events, ordered by start time.
    pub calendar_events: Vec<Event>,

    /// Yesterday's notes.
    pub notes: Vec<Note>,

    /// Incomplete todos for the date.
    pub incomplete_todos: Vec<Todo>,

    /// Provider health as observed during this assembly pass.
    pub capabilities: CapabilityMap,

    pub user_input: Option<String>,
}

impl BriefingContext {
    /// The text value a prompt placeholder expands to, or `None` for an
    /// unknown placeholder name.
    pub fn value_of(&self, name: &str) -> Option<String> {
        match name {
            "date" => Some(self.date.to_string()),
            "weather" => Some(self.weather.clone()),
            "calendar_events" => Some(render_events(&self.calendar_events)),
            "notes" => Some(render_notes(&self.notes)),
            "todos" => Some(render_todos(&self.incomplete_todos)),
            "capabilities" => Some(self.capabilities.render()),
            "user_input" => Some(self.user_input.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

fn render_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "none".into();
    }
    events
        .iter()
        .map(|e| {
            let mut line = format!(
                "- {} ({} to {})",
                e.title,
                e.start.format("%H:%M"),
                e.end.format("%H:%M")
            );
            if let Some(location) = &e.location {
                line.push_str(&format!(" at {location}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "none".into();
    }
    notes
        .iter()
        .map(|n| format!("- {}: {}", n.title, n.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_todos(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "none".into();
    }
    todos
        .iter()
        .map(|t| format!("- [{}] {}", t.id, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fans out to the providers and store and merges the results.
///
/// Handles are injected once at startup; the assembler holds them for its
/// lifetime and rebuilds the capability map on every call.
pub struct ContextAssembler {
    calendar: Arc<dyn CalendarProvider>,
    notes: Arc<dyn NotesProvider>,
    weather: Arc<dyn WeatherProvider>,
    store: Arc<dyn TaskStore>,
}

impl ContextAssembler {
    pub fn new(
        calendar: Arc<dyn CalendarProvider>,
        notes: Arc<dyn NotesProvider>,
        weather: Arc<dyn WeatherProvider>,
        store: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            calendar,
            notes,
            weather,
            store,
        }
    }

    /// Assemble the context for a date.
    ///
    /// Events and todos are read for `date`; notes for the day before
    /// (the briefing reviews yesterday). The four reads run concurrently.
    pub async fn assemble(
        &self,
        date: NaiveDate,
        location: &str,
        user_input: Option<String>,
    ) -> BriefingContext {
        let yesterday = date.pred_opt().unwrap_or(date);

        let (weather, events, notes, todos) = tokio::join!(
            self.weather.current(location),
            self.calendar.events_for(date),
            self.notes.notes_for(yesterday),
            self.store.get_incomplete_todos(date),
        );

        let mut capabilities = CapabilityMap::all_available();

        let weather = match weather {
            Ok(report) => report.to_string(),
            Err(err) => {
                warn!(%err, "Weather fetch failed, degrading");
                capabilities.record_error(ProviderKind::Weather, err.to_string());
                WEATHER_UNAVAILABLE.to_string()
            }
        };

        let calendar_events = match events {
            Ok(events) => events,
            Err(err) => {
                warn!(%err, "Calendar fetch failed, degrading");
                capabilities.record_error(ProviderKind::Calendar, err.to_string());
                Vec::new()
            }
        };

        let notes = match notes {
            Ok(notes) => notes,
            Err(err) => {
                warn!(%err, "Notes fetch failed, degrading");
                capabilities.record_error(ProviderKind::Notes, err.to_string());
                Vec::new()
            }
        };

        let incomplete_todos = match todos {
            Ok(todos) => todos,
            Err(err) => {
                warn!(%err, "Todo read failed, degrading");
                capabilities.record_error(ProviderKind::Tasks, err.to_string());
                Vec::new()
            }
        };

        BriefingContext {
            date,
            weather,
            calendar_events,
            notes,
            incomplete_todos,
            capabilities,
            user_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybrief_providers::{InMemoryCalendar, InMemoryNotes, StaticWeather};
    use daybrief_store::SqliteTaskStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn memory_store() -> Arc<dyn TaskStore> {
        Arc::new(SqliteTaskStore::new("sqlite::memory:").await.unwrap())
    }

    #[tokio::test]
    async fn assemble_with_healthy_providers() {
        let store = memory_store().await;
        store.store_todo(date("2025-06-22"), "Water plants").await.unwrap();

        let assembler = ContextAssembler::new(
            Arc::new(InMemoryCalendar::new()),
            Arc::new(InMemoryNotes::new()),
            Arc::new(StaticWeather::clear_skies("London")),
            store,
        );

        let ctx = assembler.assemble(date("2025-06-22"), "London", None).await;
        assert_eq!(ctx.date, date("2025-06-22"));
        assert!(ctx.weather.contains("clear sky"));
        assert_eq!(ctx.incomplete_todos.len(), 1);
        assert!(ctx.capabilities.status(ProviderKind::Weather).is_available());
    }

    #[tokio::test]
    async fn every_field_defined_when_all_providers_fail() {
        let calendar = InMemoryCalendar::new();
        calendar.set_failing("calendar outage");
        let notes = InMemoryNotes::new();
        notes.set_failing("notes outage");
        let weather = StaticWeather::clear_skies("London");
        weather.set_failing("weather outage");

        let assembler = ContextAssembler::new(
            Arc::new(calendar),
            Arc::new(notes),
            Arc::new(weather),
            memory_store().await,
        );

        let ctx = assembler.assemble(date("2025-06-22"), "London", None).await;

        assert_eq!(ctx.weather, WEATHER_UNAVAILABLE);
        assert!(ctx.calendar_events.is_empty());
        assert!(ctx.notes.is_empty());
        assert!(ctx.incomplete_todos.is_empty());
        assert!(!ctx.capabilities.status(ProviderKind::Calendar).is_available());
        assert!(!ctx.capabilities.status(ProviderKind::Notes).is_available());
        assert!(!ctx.capabilities.status(ProviderKind::Weather).is_available());
        // Placeholders still all resolve.
        for name in ["date", "weather", "calendar_events", "notes", "todos", "capabilities"] {
            assert!(ctx.value_of(name).is_some(), "missing placeholder {name}");
        }
    }

    #[tokio::test]
    async fn capability_map_is_rebuilt_each_call() {
        let calendar = Arc::new(InMemoryCalendar::new());
        let assembler = ContextAssembler::new(
            calendar.clone(),
            Arc::new(InMemoryNotes::new()),
            Arc::new(StaticWeather::clear_skies("London")),
            memory_store().await,
        );

        calendar.set_failing("transient");
        let degraded = assembler.assemble(date("2025-06-22"), "London", None).await;
        assert!(!degraded.capabilities.status(ProviderKind::Calendar).is_available());

        // A fresh in-memory calendar has no way to recover, so swap the
        // failure off instead.
        let recovered_calendar = InMemoryCalendar::new();
        let assembler = ContextAssembler::new(
            Arc::new(recovered_calendar),
            Arc::new(InMemoryNotes::new()),
            Arc::new(StaticWeather::clear_skies("London")),
            memory_store().await,
        );
        let healthy = assembler.assemble(date("2025-06-22"), "London", None).await;
        assert!(healthy.capabilities.status(ProviderKind::Calendar).is_available());
    }

    #[test]
    fn empty_collections_render_as_none() {
        assert_eq!(render_events(&[]), "none");
        assert_eq!(render_notes(&[]), "none");
        assert_eq!(render_todos(&[]), "none");
    }

    #[test]
    fn unknown_placeholder_yields_nothing() {
        let ctx = BriefingContext {
            date: date("2025-06-22"),
            weather: "sunny".into(),
            calendar_events: Vec::new(),
            notes: Vec::new(),
            incomplete_todos: Vec::new(),
            capabilities: CapabilityMap::all_available(),
            user_input: None,
        };
        assert!(ctx.value_of("horoscope").is_none());
    }
}
