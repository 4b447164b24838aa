//! Capability surface — which providers exist and what they can do.
//!
//! The set of providers is fixed at build time, so capability dispatch is a
//! closed enum rather than a string-keyed runtime registry. The capability
//! map is rebuilt on every context assembly from that call's outcomes;
//! it is never cached across calls.

use serde::{Deserialize, Serialize};

/// The closed set of providers the assistant talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Calendar,
    Notes,
    Weather,
    Tasks,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Calendar,
        ProviderKind::Notes,
        ProviderKind::Weather,
        ProviderKind::Tasks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Calendar => "calendar",
            ProviderKind::Notes => "notes",
            ProviderKind::Weather => "weather",
            ProviderKind::Tasks => "tasks",
        }
    }

    /// The operation descriptors each provider supports. Fixed at build
    /// time; weather is fetch-only.
    pub fn operations(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Calendar => {
                &["list_events", "create_event", "update_event", "delete_event"]
            }
            ProviderKind::Notes => &["get_notes", "create_note", "update_note", "delete_note"],
            ProviderKind::Weather => &["current_weather"],
            ProviderKind::Tasks => &["add_todo", "complete_todo", "incomplete_todos"],
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Health of a single provider as observed during one assembly pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapabilityStatus {
    Available,
    Error { reason: String },
}

impl CapabilityStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, CapabilityStatus::Available)
    }
}

/// Per-provider health and operations, keyed by the closed provider set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityMap {
    entries: Vec<CapabilityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityEntry {
    pub kind: ProviderKind,
    pub status: CapabilityStatus,
}

impl CapabilityMap {
    /// A map with every provider marked available.
    pub fn all_available() -> Self {
        Self {
            entries: ProviderKind::ALL
                .iter()
                .map(|kind| CapabilityEntry {
                    kind: *kind,
                    status: CapabilityStatus::Available,
                })
                .collect(),
        }
    }

    /// Mark a provider as failed for this assembly pass.
    pub fn record_error(&mut self, kind: ProviderKind, reason: impl Into<String>) {
        let reason = reason.into();
        for entry in &mut self.entries {
            if entry.kind == kind {
                entry.status = CapabilityStatus::Error {
                    reason: reason.clone(),
                };
            }
        }
    }

    pub fn status(&self, kind: ProviderKind) -> &CapabilityStatus {
        // ALL covers every variant, so the entry always exists.
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| &e.status)
            .unwrap_or(&CapabilityStatus::Available)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapabilityEntry> {
        self.entries.iter()
    }

    /// Render the map as prompt-ready text, one provider per line.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                let status = match &entry.status {
                    CapabilityStatus::Available => "available".to_string(),
                    CapabilityStatus::Error { reason } => format!("error ({reason})"),
                };
                format!(
                    "- {}: {} — operations: {}",
                    entry.kind,
                    status,
                    entry.kind.operations().join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CapabilityMap {
    fn default() -> Self {
        Self::all_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_present_in_fresh_map() {
        let map = CapabilityMap::all_available();
        for kind in ProviderKind::ALL {
            assert!(map.status(kind).is_available());
        }
    }

    #[test]
    fn record_error_flips_one_provider() {
        let mut map = CapabilityMap::all_available();
        map.record_error(ProviderKind::Weather, "timeout");

        assert!(!map.status(ProviderKind::Weather).is_available());
        assert!(map.status(ProviderKind::Calendar).is_available());
        assert!(map.status(ProviderKind::Notes).is_available());
        assert!(map.status(ProviderKind::Tasks).is_available());
    }

    #[test]
    fn weather_is_fetch_only() {
        assert_eq!(ProviderKind::Weather.operations(), &["current_weather"]);
    }

    #[test]
    fn render_names_every_provider() {
        let mut map = CapabilityMap::all_available();
        map.record_error(ProviderKind::Notes, "401 Unauthorized");
        let text = map.render();

        assert!(text.contains("calendar: available"));
        assert!(text.contains("notes: error (401 Unauthorized)"));
        assert!(text.contains("create_event"));
        assert!(text.contains("complete_todo"));
    }
}
