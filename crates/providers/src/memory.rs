//! In-memory provider implementations.
//!
//! Used two ways: as test doubles for the assembler and flow tests, and
//! as the offline fallbacks wired up when no service URL is configured.
//! Each one can be flipped into a failing state to exercise degradation.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use daybrief_core::error::ProviderError;
use daybrief_core::provider::{CalendarProvider, NotesProvider, WeatherProvider};
use daybrief_core::record::{
    Event, EventPatch, NewEvent, NewNote, Note, NotePatch, WeatherReport,
};

fn check_fail(fail: &Mutex<Option<String>>) -> Result<(), ProviderError> {
    let guard = fail.lock().unwrap_or_else(|e| e.into_inner());
    match guard.as_ref() {
        Some(reason) => Err(ProviderError::Unavailable(reason.clone())),
        None => Ok(()),
    }
}

/// In-memory calendar backed by a `Vec`.
#[derive(Default)]
pub struct InMemoryCalendar {
    events: Mutex<Vec<Event>>,
    fail: Mutex<Option<String>>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with pre-existing events.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            fail: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with the given reason.
    pub fn set_failing(&self, reason: impl Into<String>) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }
}

#[async_trait]
impl CalendarProvider for InMemoryCalendar {
    async fn events_for(&self, date: NaiveDate) -> Result<Vec<Event>, ProviderError> {
        check_fail(&self.fail)?;
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let mut matching: Vec<Event> = events
            .iter()
            .filter(|e| e.start.date_naive() == date)
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.start);
        Ok(matching)
    }

    async fn create_event(&self, event: NewEvent) -> Result<String, ProviderError> {
        check_fail(&self.fail)?;
        if event.title.trim().is_empty() {
            return Err(ProviderError::Validation(
                "event title must not be empty".into(),
            ));
        }
        let id = format!("ev_{}", uuid::Uuid::new_v4());
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(Event {
            id: id.clone(),
            title: event.title,
            start: event.start,
            end: event.end,
            location: event.location,
            description: event.description,
        });
        Ok(id)
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<(), ProviderError> {
        check_fail(&self.fail)?;
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ProviderError::NotFound(format!("event {id}")))?;
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(location) = patch.location {
            event.location = Some(location);
        }
        if let Some(description) = patch.description {
            event.description = Some(description);
        }
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> Result<(), ProviderError> {
        check_fail(&self.fail)?;
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(ProviderError::NotFound(format!("event {id}")));
        }
        Ok(())
    }
}

/// In-memory notes backed by a `Vec`.
#[derive(Default)]
pub struct InMemoryNotes {
    notes: Mutex<Vec<Note>>,
    fail: Mutex<Option<String>>,
}

impl InMemoryNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            fail: Mutex::new(None),
        }
    }

    pub fn set_failing(&self, reason: impl Into<String>) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }
}

#[async_trait]
impl NotesProvider for InMemoryNotes {
    async fn notes_for(&self, date: NaiveDate) -> Result<Vec<Note>, ProviderError> {
        check_fail(&self.fail)?;
        let notes = self.notes.lock().unwrap_or_else(|e| e.into_inner());
        Ok(notes.iter().filter(|n| n.date == date).cloned().collect())
    }

    async fn create_note(&self, note: NewNote) -> Result<String, ProviderError> {
        check_fail(&self.fail)?;
        if note.content.trim().is_empty() {
            return Err(ProviderError::Validation(
                "note content must not be empty".into(),
            ));
        }
        let id = format!("n_{}", uuid::Uuid::new_v4());
        let mut notes = self.notes.lock().unwrap_or_else(|e| e.into_inner());
        notes.push(Note {
            id: id.clone(),
            title: note.title,
            content: note.content,
            date: chrono::Local::now().date_naive(),
            tags: note.tags,
        });
        Ok(id)
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<(), ProviderError> {
        check_fail(&self.fail)?;
        let mut notes = self.notes.lock().unwrap_or_else(|e| e.into_inner());
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ProviderError::NotFound(format!("note {id}")))?;
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), ProviderError> {
        check_fail(&self.fail)?;
        let mut notes = self.notes.lock().unwrap_or_else(|e| e.into_inner());
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(ProviderError::NotFound(format!("note {id}")));
        }
        Ok(())
    }
}

/// Weather provider that always returns the same report.
pub struct StaticWeather {
    report: WeatherReport,
    fail: Mutex<Option<String>>,
}

impl StaticWeather {
    pub fn new(report: WeatherReport) -> Self {
        Self {
            report,
            fail: Mutex::new(None),
        }
    }

    /// A mild, fully-populated default report.
    pub fn clear_skies(location: impl Into<String>) -> Self {
        Self::new(WeatherReport {
            location: location.into(),
            temperature_c: Some(21.0),
            feels_like_c: Some(21.0),
            humidity_pct: Some(45),
            wind_speed_ms: Some(2.0),
            conditions: Some("clear sky".into()),
            pressure_hpa: Some(1013),
        })
    }

    pub fn set_failing(&self, reason: impl Into<String>) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }
}

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn current(&self, location: &str) -> Result<WeatherReport, ProviderError> {
        check_fail(&self.fail)?;
        let mut report = self.report.clone();
        report.location = location.to_string();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn calendar_create_then_list() {
        let calendar = InMemoryCalendar::new();
        let id = calendar
            .create_event(NewEvent {
                title: "Standup".into(),
                start: DateTime::parse_from_rfc3339("2025-06-22T09:00:00+00:00").unwrap(),
                end: DateTime::parse_from_rfc3339("2025-06-22T09:15:00+00:00").unwrap(),
                location: None,
                description: None,
            })
            .await
            .unwrap();
        assert!(id.starts_with("ev_"));

        let events = calendar.events_for(date("2025-06-22")).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");

        let other_day = calendar.events_for(date("2025-06-23")).await.unwrap();
        assert!(other_day.is_empty());
    }

    #[tokio::test]
    async fn calendar_update_unknown_id_is_not_found() {
        let calendar = InMemoryCalendar::new();
        let err = calendar
            .update_event(
                "ev_missing",
                EventPatch {
                    title: Some("x".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[tokio::test]
    async fn failing_mode_makes_every_call_unavailable() {
        let calendar = InMemoryCalendar::new();
        calendar.set_failing("simulated outage");
        let err = calendar.events_for(date("2025-06-22")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }

    #[tokio::test]
    async fn notes_crud_round_trip() {
        let notes = InMemoryNotes::new();
        let id = notes
            .create_note(NewNote::untitled("remember the milk"))
            .await
            .unwrap();

        notes
            .update_note(
                &id,
                NotePatch {
                    title: Some("Groceries".into()),
                    content: None,
                },
            )
            .await
            .unwrap();

        notes.delete_note(&id).await.unwrap();
        let err = notes.delete_note(&id).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[tokio::test]
    async fn static_weather_echoes_requested_location() {
        let weather = StaticWeather::clear_skies("London");
        let report = weather.current("Delhi").await.unwrap();
        assert_eq!(report.location, "Delhi");
        assert_eq!(report.conditions.as_deref(), Some("clear sky"));
    }
}
