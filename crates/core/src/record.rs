//! Record types for the three external providers and the task store.
//!
//! These are the value objects that flow through the system: the providers
//! own `Event` and `Note` identity and lifecycle, the task store owns
//! `Todo` and `Briefing`. The core never holds authoritative copies.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar event. The `id` is provider-assigned and opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,

    pub title: String,

    /// Start timestamp, with timezone.
    pub start: DateTime<FixedOffset>,

    /// End timestamp, with timezone.
    pub end: DateTime<FixedOffset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields for creating a new calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A partial update to an existing event. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.location.is_none() && self.description.is_none()
    }
}

/// A note. The `id` is provider-assigned and opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,

    pub title: String,

    pub content: String,

    /// The calendar date the note belongs to.
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Fields for creating a new note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewNote {
    /// A note with content only, titled "Untitled".
    pub fn untitled(content: impl Into<String>) -> Self {
        Self {
            title: "Untitled".into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }
}

/// A partial update to an existing note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A todo item, extracted from a briefing and tracked to completion.
///
/// Lifecycle: created, then optionally completed. Never deleted —
/// completion is a soft flag, not a removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned autoincrement id.
    pub id: i64,

    /// The date the item was created for.
    pub date: NaiveDate,

    pub text: String,

    pub completed: bool,
}

/// A generated daily briefing. Immutable once stored.
///
/// One per date in the intended design; the store does not enforce
/// uniqueness and a regenerated briefing appends another row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Briefing {
    pub date: NaiveDate,

    /// Full rendered text as produced by the completion call.
    pub summary: String,
}

/// Current weather conditions for a location.
///
/// Fields missing upstream are carried as `None` and rendered as explicit
/// "unknown" markers, never silently omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,

    pub temperature_c: Option<f64>,

    pub feels_like_c: Option<f64>,

    pub humidity_pct: Option<u32>,

    pub wind_speed_ms: Option<f64>,

    pub conditions: Option<String>,

    pub pressure_hpa: Option<u32>,
}

impl WeatherReport {
    fn fmt_opt<T: std::fmt::Display>(v: &Option<T>, unit: &str) -> String {
        match v {
            Some(v) => format!("{v}{unit}"),
            None => "unknown".into(),
        }
    }
}

impl std::fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weather in {}: {}, temperature {}, feels like {}, humidity {}, wind {}, pressure {}",
            self.location,
            self.conditions.as_deref().unwrap_or("unknown"),
            Self::fmt_opt(&self.temperature_c, "°C"),
            Self::fmt_opt(&self.feels_like_c, "°C"),
            Self::fmt_opt(&self.humidity_pct, "%"),
            Self::fmt_opt(&self.wind_speed_ms, " m/s"),
            Self::fmt_opt(&self.pressure_hpa, " hPa"),
        )
    }
}
