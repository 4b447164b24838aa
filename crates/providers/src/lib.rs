//! Provider adapters for the daybrief assistant.
//!
//! Three kinds of adapter live here:
//! - HTTP adapters for REST calendar and notes services
//! - the OpenWeatherMap adapter
//! - in-memory implementations used in tests and offline mode
//!
//! All adapters implement the traits from `daybrief-core` and are handed
//! to the context assembler as `Arc<dyn ...>` handles. None of them cache:
//! every call is a fresh round trip.

pub mod calendar;
pub mod memory;
pub mod notes;
pub mod weather;

pub use calendar::HttpCalendarProvider;
pub use memory::{InMemoryCalendar, InMemoryNotes, StaticWeather};
pub use notes::HttpNotesProvider;
pub use weather::OpenWeatherProvider;
